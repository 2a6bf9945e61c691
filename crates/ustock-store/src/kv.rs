//! # Key-Value Store
//!
//! Persistent mapping from string keys to either a string or a set of
//! distinct strings.
//!
//! ## Storage Layout
//! ```text
//! kv_entries
//! ┌────────────┬────────┬───────────────────────────────┬────────────┐
//! │ key        │ kind   │ value                         │ updated_at │
//! ├────────────┼────────┼───────────────────────────────┼────────────┤
//! │ userLists  │ set    │ ["Cellier","Fridge"]          │ ...        │
//! │ Fridge     │ set    │ ["{\"name\":\"Milk\",...}"]   │ ...        │
//! │ Cellier    │ set    │ []                            │ ...        │
//! └────────────┴────────┴───────────────────────────────┴────────────┘
//! ```
//!
//! An empty set is stored as `[]` and stays distinct from a missing key.
//! Set members are kept sorted, so reading a set is deterministic.

use std::collections::BTreeSet;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Kind of value held under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Set,
}

impl ValueKind {
    /// Column value in `kv_entries.kind`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Set => "set",
        }
    }
}

/// Key-value access over the store's pool.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    pool: SqlitePool,
}

impl KeyValueStore {
    /// Creates a new KeyValueStore.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueStore { pool }
    }

    // =========================================================================
    // Sets
    // =========================================================================

    /// Reads the set stored under `key`. `None` if the key is absent.
    ///
    /// ## Errors
    /// - `TypeMismatch` if the key holds a string
    /// - `CorruptValue` if the stored JSON is not an array of strings
    pub async fn get_set(&self, key: &str) -> StoreResult<Option<BTreeSet<String>>> {
        let Some(raw) = self.fetch(key, ValueKind::Set).await? else {
            return Ok(None);
        };

        let members: BTreeSet<String> =
            serde_json::from_str(&raw).map_err(|e| StoreError::CorruptValue {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Some(members))
    }

    /// Reads the set stored under `key`, or an empty set if the key is absent.
    pub async fn get_set_or_default(&self, key: &str) -> StoreResult<BTreeSet<String>> {
        Ok(self.get_set(key).await?.unwrap_or_default())
    }

    /// Replaces the value under `key` with `members`.
    pub async fn put_set(&self, key: &str, members: &BTreeSet<String>) -> StoreResult<()> {
        let raw = serde_json::to_string(members)?;
        debug!(key = %key, members = members.len(), "Writing set");
        self.upsert(key, ValueKind::Set, &raw).await
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Reads the string stored under `key`. `None` if the key is absent.
    pub async fn get_string(&self, key: &str) -> StoreResult<Option<String>> {
        self.fetch(key, ValueKind::String).await
    }

    /// Replaces the value under `key` with `value`.
    pub async fn put_string(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key = %key, "Writing string");
        self.upsert(key, ValueKind::String, value).await
    }

    // =========================================================================
    // Keys
    // =========================================================================

    /// Deletes `key`. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM kv_entries WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected() > 0, "Removed key");
        Ok(result.rows_affected() > 0)
    }

    /// Returns whether `key` holds any value.
    pub async fn contains(&self, key: &str) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Returns every key, sorted.
    pub async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_entries ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    // =========================================================================
    // Row Access
    // =========================================================================

    async fn fetch(&self, key: &str, expected: ValueKind) -> StoreResult<Option<String>> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT kind, value FROM kv_entries WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            None => Ok(None),
            Some((kind, value)) if kind == expected.as_str() => Ok(Some(value)),
            Some((kind, _)) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
                expected: expected.as_str().to_string(),
                found: kind,
            }),
        }
    }

    async fn upsert(&self, key: &str, kind: ValueKind, value: &str) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, kind, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(key) DO UPDATE SET
                kind = excluded.kind,
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(kind.as_str())
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    async fn kv() -> KeyValueStore {
        Store::new(StoreConfig::in_memory()).await.unwrap().kv()
    }

    fn set(members: &[&str]) -> BTreeSet<String> {
        members.iter().map(|m| m.to_string()).collect()
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_absent() {
        let kv = kv().await;

        assert_eq!(kv.get_set("nope").await.unwrap(), None);
        assert!(kv.get_set_or_default("nope").await.unwrap().is_empty());
        assert_eq!(kv.get_string("nope").await.unwrap(), None);
        assert!(!kv.contains("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_set_is_distinct_from_missing() {
        let kv = kv().await;

        kv.put_set("Cellier", &BTreeSet::new()).await.unwrap();

        assert_eq!(kv.get_set("Cellier").await.unwrap(), Some(BTreeSet::new()));
        assert!(kv.contains("Cellier").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_set_replaces_value() {
        let kv = kv().await;

        kv.put_set("k", &set(&["a", "b"])).await.unwrap();
        kv.put_set("k", &set(&["c"])).await.unwrap();

        assert_eq!(kv.get_set("k").await.unwrap(), Some(set(&["c"])));
    }

    #[tokio::test]
    async fn test_strings_and_type_mismatch() {
        let kv = kv().await;

        kv.put_string("api", "https://example.test").await.unwrap();
        assert_eq!(
            kv.get_string("api").await.unwrap().as_deref(),
            Some("https://example.test")
        );

        assert!(matches!(
            kv.get_set("api").await,
            Err(StoreError::TypeMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_and_keys() {
        let kv = kv().await;

        kv.put_set("b", &set(&["x"])).await.unwrap();
        kv.put_string("a", "y").await.unwrap();
        assert_eq!(kv.keys().await.unwrap(), vec!["a", "b"]);

        assert!(kv.remove("b").await.unwrap());
        assert!(!kv.remove("b").await.unwrap());
        assert_eq!(kv.keys().await.unwrap(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_corrupt_set_value() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO kv_entries (key, kind, value) VALUES ('bad', 'set', 'not json')")
            .execute(store.pool())
            .await
            .unwrap();

        assert!(matches!(
            store.kv().get_set("bad").await,
            Err(StoreError::CorruptValue { .. })
        ));
    }
}
