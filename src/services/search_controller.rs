use anyhow::Result;
use tracing::debug;

use crate::repository::SharedStorage;
use crate::services::persistent_value::PersistentValue;

/// Storage key of the last search term.
pub const SEARCH_KEY: &str = "search";

/// Owns the search query and keeps it mirrored in durable storage.
pub struct SearchController {
    query: PersistentValue<String>,
    focus_pending: bool,
}

impl SearchController {
    pub async fn init(storage: SharedStorage) -> Result<Self> {
        let query = PersistentValue::init(storage, SEARCH_KEY, String::new()).await?;
        debug!(query = %query.get(), "Search restored");
        Ok(Self {
            query,
            focus_pending: true,
        })
    }

    pub fn query(&self) -> &str {
        self.query.get()
    }

    pub async fn set_query(&mut self, value: impl Into<String>) -> Result<()> {
        self.query.set(value.into()).await
    }

    /// True on the first call after mount, false ever after.
    pub fn take_initial_focus(&mut self) -> bool {
        std::mem::replace(&mut self.focus_pending, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryKeyValueStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_init_defaults_to_empty_query() {
        let controller = SearchController::init(Arc::new(MemoryKeyValueStorage::new()))
            .await
            .unwrap();
        assert_eq!(controller.query(), "");
    }

    #[tokio::test]
    async fn test_query_round_trips_through_storage() {
        let storage = MemoryKeyValueStorage::new();

        let mut controller = SearchController::init(Arc::new(storage.clone())).await.unwrap();
        controller.set_query("Nether").await.unwrap();
        drop(controller);

        let restored = SearchController::init(Arc::new(storage.clone())).await.unwrap();
        assert_eq!(restored.query(), "Nether");
        assert_eq!(storage.snapshot().get(SEARCH_KEY), Some(&"Nether".to_string()));
    }

    #[tokio::test]
    async fn test_initial_focus_fires_once() {
        let mut controller = SearchController::init(Arc::new(MemoryKeyValueStorage::new()))
            .await
            .unwrap();

        assert!(controller.take_initial_focus());
        controller.set_query("usa").await.unwrap();
        assert!(!controller.take_initial_focus());
        assert!(!controller.take_initial_focus());
    }
}
