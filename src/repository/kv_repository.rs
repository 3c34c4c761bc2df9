use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tracing::debug;

/// Durable string-to-string storage. Values are stored as plain strings with no
/// schema versioning; `set` replaces any prior value for the key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub type SharedStorage = Arc<dyn KeyValueStorage>;

#[derive(Clone)]
pub struct SqliteKeyValueRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteKeyValueRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStorage for SqliteKeyValueRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let record = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(record.map(|row| row.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&*self.pool)
        .await?;

        debug!(key = %key, "Stored value");
        Ok(())
    }
}
