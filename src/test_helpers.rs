// Test helpers for integration testing

use crate::repository::{MemoryKeyValueStorage, SharedStorage};
use crate::services::HouseApp;
use std::sync::Arc;

pub struct TestContext {
    pub storage: MemoryKeyValueStorage,
}

impl TestContext {
    pub fn new_for_test() -> Self {
        Self {
            storage: MemoryKeyValueStorage::new(),
        }
    }

    pub fn shared_storage(&self) -> SharedStorage {
        Arc::new(self.storage.clone())
    }

    /// A fresh app over this context's storage, as after a restart.
    pub async fn mount(&self) -> anyhow::Result<HouseApp> {
        HouseApp::init(self.shared_storage()).await
    }
}
