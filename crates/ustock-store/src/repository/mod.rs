//! # Repository Module
//!
//! Typed views over the key-value store.
//!
//! ```text
//! CLI command
//!      │  store.lists().add_item("Fridge", &item)
//!      ▼
//! ListRegistry ──► KeyValueStore ──► kv_entries
//! ```
//!
//! ## Available Repositories
//!
//! - [`ListRegistry`](lists::ListRegistry) - list names and their items

pub mod lists;
