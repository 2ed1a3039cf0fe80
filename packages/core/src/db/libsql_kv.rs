//! libsql KvStore backend
//!
//! Durable implementation over the `kv_store` table managed by
//! [`DatabaseService`]. Every method opens a fresh connection with the busy
//! timeout configured, so concurrent callers serialize gracefully.

use crate::db::database::DatabaseService;
use crate::db::error::StoreError;
use crate::db::kv::KvStore;
use anyhow::Result;
use async_trait::async_trait;

/// Durable key-value store backed by an embedded libsql database
#[derive(Debug, Clone)]
pub struct LibsqlKv {
    db: DatabaseService,
}

impl LibsqlKv {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KvStore for LibsqlKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.db.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare("SELECT value FROM kv_store WHERE key = ?")
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to prepare get: {}", e)))?;

        let mut rows = stmt
            .query([key])
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to execute get: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to read get row: {}", e)))?
        {
            Some(row) => {
                let value: String = row.get(0).map_err(|e| {
                    StoreError::sql_execution(format!("Failed to decode value column: {}", e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.db.connect_with_timeout().await?;

        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            (key, value),
        )
        .await
        .map_err(|e| StoreError::sql_execution(format!("Failed to upsert key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let conn = self.db.connect_with_timeout().await?;

        let affected = conn
            .execute("DELETE FROM kv_store WHERE key = ?", [key])
            .await
            .map_err(|e| {
                StoreError::sql_execution(format!("Failed to delete key '{}': {}", key, e))
            })?;

        Ok(affected > 0)
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let conn = self.db.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to prepare keys: {}", e)))?;

        let mut rows = stmt
            .query(())
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to execute keys: {}", e)))?;

        let mut keys = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to read keys row: {}", e)))?
        {
            let key: String = row.get(0).map_err(|e| {
                StoreError::sql_execution(format!("Failed to decode key column: {}", e))
            })?;
            keys.push(key);
        }

        Ok(keys)
    }

    async fn total_size(&self) -> Result<u64> {
        let conn = self.db.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare("SELECT COALESCE(SUM(LENGTH(key) + LENGTH(value)), 0) FROM kv_store")
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to prepare size: {}", e)))?;

        let mut rows = stmt
            .query(())
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to execute size: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to read size row: {}", e)))?
        {
            Some(row) => {
                let size: i64 = row.get(0).map_err(|e| {
                    StoreError::sql_execution(format!("Failed to decode size column: {}", e))
                })?;
                Ok(size.max(0) as u64)
            }
            None => Ok(0),
        }
    }

    async fn clear(&self) -> Result<()> {
        let conn = self.db.connect_with_timeout().await?;

        conn.execute("DELETE FROM kv_store", ())
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to clear kv_store: {}", e)))?;

        Ok(())
    }
}
