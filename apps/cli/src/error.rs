//! # User-Facing Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in UStock                                 │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, ApiError>                            │
//! │         │                                                               │
//! │         ├── StoreError::NotFound ──────────────┐                       │
//! │         ├── ValidationError::Required ─────────┤                       │
//! │         ├── ResolverError (lookup) ────────────┼──► ApiError           │
//! │         └── ConfigError ───────────────────────┘       │               │
//! │                                                        ▼               │
//! │                                    stderr: "Veuillez remplir ..."      │
//! │                                    --json: {"code": ..., "message":..} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and internal failures are logged in full and shown with a
//! generic message.

use serde::Serialize;
use tracing::error;
use ustock_core::{CoreError, ValidationError};
use ustock_resolver::ResolverError;
use ustock_store::StoreError;

use crate::state::ConfigError;

/// Notice shown when a required field is missing.
pub const REQUIRED_FIELDS_NOTICE: &str = "Veuillez remplir tous les champs obligatoires";

/// Notice shown when a product lookup fails and no fallback name exists.
pub const LOOKUP_FAILED_NOTICE: &str = "Erreur de récupération des informations";

/// Error returned from commands.
///
/// ## Serialization
/// With `--json` this is printed as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "List not found: Fridge"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// List or item not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Store operation failed
    StorageError,

    /// Product lookup failed
    LookupFailed,

    /// Bad or unreadable configuration
    ConfigError,

    /// The user interrupted the command
    Cancelled,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the lookup failure notice.
    pub fn lookup_failed() -> Self {
        ApiError::new(ErrorCode::LookupFailed, LOOKUP_FAILED_NOTICE)
    }

    /// Creates the notice for an interrupted add-product screen.
    pub fn cancelled() -> Self {
        ApiError::new(ErrorCode::Cancelled, "Saisie annulée")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Required { .. } => ApiError::validation(REQUIRED_FIELDS_NOTICE),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidDate(_) => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Validation(e) => e.into(),
            StoreError::TypeMismatch { .. } | StoreError::CorruptValue { .. } => {
                error!(error = %err, "Stored data is damaged");
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Database pool exhausted")
            }
            StoreError::ConnectionFailed(_) => {
                error!(error = %err, "Database connection failed");
                ApiError::new(ErrorCode::StorageError, "Database connection failed")
            }
            StoreError::MigrationFailed(_) => {
                error!(error = %err, "Database migration failed");
                ApiError::new(ErrorCode::StorageError, "Database migration failed")
            }
            StoreError::Serialization(_)
            | StoreError::QueryFailed(_)
            | StoreError::Internal(_) => {
                error!(error = %err, "Store operation failed");
                ApiError::new(ErrorCode::StorageError, "Database operation failed")
            }
        }
    }
}

impl From<ResolverError> for ApiError {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::InvalidCode(e) => e.into(),
            ResolverError::InvalidConfig(_) | ResolverError::InvalidUrl(_) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            other => {
                error!(error = %other, "Product lookup failed");
                ApiError::lookup_failed()
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;
