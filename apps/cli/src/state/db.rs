//! # Store State
//!
//! Wraps the `Store` handle shared by every command.
//!
//! The `Store` from `ustock-store` holds a `SqlitePool`, so it is cheap to
//! clone and safe to use from several tasks.

use std::path::Path;

use tracing::info;
use ustock_store::{ListRegistry, Store, StoreConfig, StoreResult};

/// Store handle for commands.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Store,
}

impl StoreState {
    /// Wraps an open store.
    pub fn new(store: Store) -> Self {
        StoreState { store }
    }

    /// Opens (and migrates) the database file at `path`.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        let store = Store::new(StoreConfig::new(path)).await?;
        info!(path = %path.display(), "Store ready");
        Ok(StoreState::new(store))
    }

    /// Opens a throwaway in-memory store.
    pub async fn in_memory() -> StoreResult<Self> {
        Ok(StoreState::new(Store::new(StoreConfig::in_memory()).await?))
    }

    /// Returns a reference to the inner Store.
    pub fn inner(&self) -> &Store {
        &self.store
    }

    /// Shortcut for `inner().lists()`.
    pub fn lists(&self) -> ListRegistry {
        self.store.lists()
    }
}
