//! Key-value store holding the serialized collections.
//!
//! Every collection lives under one key as a JSON array. Reads always
//! go back to the database and re-parse; a payload that fails to parse
//! is reported as corruption, never as an empty collection.

use serde::Serialize;
use serde::de::DeserializeOwned;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;

use crate::error::DbError;

pub const USERS_KEY: &str = "users";
pub const GRIEVANCES_KEY: &str = "grievances";

#[derive(Debug, SurrealValue)]
struct EntryRow {
    payload: String,
}

/// String-keyed, string-valued store. A single key write is atomic.
#[derive(Clone)]
pub struct LocalStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> LocalStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        let mut result = self
            .db
            .query("SELECT payload FROM type::record('local_store', $key)")
            .bind(("key", key.to_string()))
            .await?;

        let rows: Vec<EntryRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(|row| row.payload))
    }

    pub async fn set_item(&self, key: &str, payload: String) -> Result<(), DbError> {
        debug!(key, bytes = payload.len(), "Writing store entry");

        self.db
            .query(
                "UPSERT type::record('local_store', $key) SET \
                 payload = $payload, updated_at = time::now()",
            )
            .bind(("key", key.to_string()))
            .bind(("payload", payload))
            .await?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    /// Parse the collection under `key`. A missing key is an empty
    /// collection.
    pub async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, DbError> {
        match self.get_item(key).await? {
            Some(payload) => serde_json::from_str(&payload).map_err(|source| DbError::Corrupted {
                key: key.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the whole collection under `key`.
    pub async fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), DbError> {
        let payload = serde_json::to_string(items).map_err(DbError::Serialize)?;
        self.set_item(key, payload).await
    }

    /// Write `seed` under `key` unless the key already holds something.
    /// Returns whether the seed was written.
    pub async fn ensure_collection<T: Serialize>(&self, key: &str, seed: &[T]) -> Result<bool, DbError> {
        if self.get_item(key).await?.is_some() {
            return Ok(false);
        }
        self.write_collection(key, seed).await?;
        Ok(true)
    }
}
