pub mod database;
pub mod kv_repository;
pub mod memory_storage;

pub use kv_repository::{KeyValueStorage, SharedStorage, SqliteKeyValueRepository};
pub use memory_storage::MemoryKeyValueStorage;

use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repository {
    pub kv: SqliteKeyValueRepository,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            kv: SqliteKeyValueRepository::new(Arc::new(pool)),
        }
    }

    /// Key-value storage handle for the services layer.
    pub fn storage(&self) -> SharedStorage {
        Arc::new(self.kv.clone())
    }
}
