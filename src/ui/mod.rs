pub mod list_view;
pub mod row_cache;

pub use list_view::{Command, HouseListView};
pub use row_cache::RowRenderCache;
