use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::kv_repository::KeyValueStorage;

/// In-process storage. Clones share the same entries, so a clone can stand in
/// for "the same backend" across a simulated restart.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Every write in the order it happened.
    pub fn write_log(&self) -> Vec<(String, String)> {
        self.writes.lock().clone()
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().clone()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}
