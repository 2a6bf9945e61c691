//! # ustock-core: Pure Logic for UStock
//!
//! This crate holds the parts of UStock that need no I/O: the item record,
//! the quantity rules, the display formatter and input validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UStock Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    ustock CLI (apps/cli)                        │   │
//! │  │    lists ──► items ──► add / scan ──► remove ──► expiring       │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼───────────────┐  ┌───────────────▼───────────────┐   │
//! │  │  ustock-store                │  │  ustock-resolver              │   │
//! │  │  key-value store, lists      │  │  GET → POST → GET lookup      │   │
//! │  └──────────────┬───────────────┘  └───────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────────────────────▼───────────────┐   │
//! │  │               ★ ustock-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  format   │  │ validation│  │   error   │  │   │
//! │  │   │   Item    │  │ dd/mm/yyyy│  │ list name │  │ CoreError │  │   │
//! │  │   │ Quantity  │  │ " | Code" │  │ code/name │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Item`, `Quantity`, `ExpirationStatus`
//! - [`format`] - the display string for an item, date formatting
//! - [`validation`] - list name, product name and code rules
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ustock_core::{Item, Quantity};
//!
//! let item = Item::new("Milk", "3017620422003")
//!     .with_quantity(Quantity::new(2).unwrap())
//!     .with_expiration(NaiveDate::from_ymd_opt(2025, 3, 7));
//!
//! assert_eq!(
//!     item.display(),
//!     "Milk | Code: 3017620422003 | Quantité: 2 | Expiration: 07/03/2025"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{days_until, ExpirationStatus, Item, Quantity};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Reserved key holding the registry of list names.
///
/// Lists are stored under their own name, so this name can never be used
/// for a list.
pub const USER_LISTS_KEY: &str = "userLists";

/// Items expiring within this many days are reported as "soon".
pub const EXPIRING_SOON_DAYS: i64 = 3;

/// Longest accepted list name, in characters.
pub const MAX_LIST_NAME_LEN: usize = 100;

/// Longest accepted product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest accepted product code, in characters.
pub const MAX_CODE_LEN: usize = 64;
