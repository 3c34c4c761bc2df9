pub mod house;
pub mod seed;
