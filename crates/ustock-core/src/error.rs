//! # Error Types
//!
//! Domain-specific error types for ustock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ustock-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  ustock-store errors        └── StoreError    - Persistence failures   │
//! │  ustock-resolver errors     └── ResolverError - Lookup failures        │
//! │  CLI errors                 └── ApiError      - What the user sees     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / StoreError → ApiError → notice    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A date string could not be read as `dd/mm/yyyy` or `yyyy-mm-dd`.
    #[error("Invalid date '{0}': expected dd/mm/yyyy")]
    InvalidDate(String),

    /// An item or list name was rejected.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejected user input.
///
/// Raised before anything is written, so the operation is simply aborted
/// and the message shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty (or blank) name, list or code.
    #[error("{field} is missing")]
    Required { field: String },

    /// Longer than the field allows, counted in characters.
    #[error("{field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    /// Zero where at least one is needed (quantities).
    #[error("{field} must be 1 or more")]
    MustBePositive { field: String },

    /// Characters the field cannot hold.
    #[error("{field} is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value collides with a name the application keeps for itself.
    #[error("{field} '{value}' is reserved")]
    Reserved { field: String, value: String },

    /// A list with this name is already registered.
    #[error("{field} '{value}' is already taken")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of core operations.
pub type CoreResult<T> = Result<T, CoreError>;
