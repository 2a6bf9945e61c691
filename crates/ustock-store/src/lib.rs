//! # ustock-store: Persistence Layer for UStock
//!
//! A small persistent key-value store (SQLite through sqlx) and the list
//! registry that keeps user lists in it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UStock Data Flow                                 │
//! │                                                                         │
//! │  CLI command (ustock add Fridge --name Milk)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   ustock-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │ ListRegistry  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (lists.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ KeyValueStore │    │ 001_kv.sql   │  │   │
//! │  │   │               │    │   (kv.rs)     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ustock.db  (key → string | set of strings)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Layout
//!
//! | Key            | Kind | Value                                 |
//! |----------------|------|---------------------------------------|
//! | `userLists`    | set  | names of all lists                    |
//! | `<list name>`  | set  | one JSON-encoded `Item` per member    |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ustock_store::{Store, StoreConfig};
//! use ustock_core::Item;
//!
//! let store = Store::new(StoreConfig::new("ustock.db")).await?;
//! store.lists().create_list("Fridge").await?;
//! store.lists().add_item("Fridge", &Item::new("Milk", "111")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::KeyValueStore;
pub use pool::{Store, StoreConfig};
pub use repository::lists::{ExpiringItem, ListRegistry};
