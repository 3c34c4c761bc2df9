use anyhow::Result;
use tracing::{debug, instrument};

use crate::repository::SharedStorage;
use crate::services::error_handling::ErrorContext;

/// Conversion between a bound value and the plain string kept in storage.
pub trait StoredValue: Clone + Send + Sync {
    fn to_stored(&self) -> String;
    fn from_stored(raw: &str) -> Option<Self>;
}

impl StoredValue for String {
    fn to_stored(&self) -> String {
        self.clone()
    }

    fn from_stored(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// One named value kept in sync with durable storage.
///
/// Reads happen once, in [`PersistentValue::init`]. Every change, including the
/// initial mount, is written through before the call returns, so storage sees
/// writes in exactly the order the value changed.
pub struct PersistentValue<T: StoredValue> {
    storage: SharedStorage,
    key: String,
    value: T,
}

impl<T: StoredValue> PersistentValue<T> {
    #[instrument(skip(storage, fallback))]
    pub async fn init(storage: SharedStorage, key: &str, fallback: T) -> Result<Self> {
        let stored = storage.get(key).await?;
        let value = stored
            .as_deref()
            .and_then(T::from_stored)
            .unwrap_or(fallback);

        debug!(key = %key, restored = stored.is_some(), "Initialized persistent value");

        let bound = Self {
            storage,
            key: key.to_string(),
            value,
        };
        // Mount write: runs even when the value equals the fallback
        bound.persist().await?;
        Ok(bound)
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn set(&mut self, value: T) -> Result<()> {
        self.value = value;
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        let raw = self.value.to_stored();
        ErrorContext::new("persist_value")
            .with_detail("key", &self.key)
            .wrap(self.storage.set(&self.key, &raw).await)
    }
}
