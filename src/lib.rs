pub mod config;
pub mod domain;
pub mod repository;
pub mod services;
pub mod ui;
pub mod utils;

// Make test_helpers available for integration tests
pub mod test_helpers;
