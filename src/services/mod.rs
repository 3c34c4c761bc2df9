pub mod app;
pub mod error_handling;
pub mod house_loader;
pub mod list_store;
pub mod persistent_value;
pub mod search_controller;
pub mod validation;

pub use app::{AppEvent, HouseApp, Intent, IntentSender};
pub use error_handling::ListingError;
pub use house_loader::HouseLoader;
pub use list_store::ListStore;
pub use persistent_value::PersistentValue;
pub use search_controller::SearchController;
