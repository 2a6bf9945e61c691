//! # Resolver Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Resolver Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Service             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  UnexpectedStatus       │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  RegistrationRejected   │ │
//! │  │  InvalidCode    │  │  Parse          │  │  StillMissing           │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant ends the same way for the user: no product, one notice.

use thiserror::Error;
use ustock_core::ValidationError;

/// Result type alias for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Why a barcode could not be resolved.
#[derive(Debug, Error)]
pub enum ResolverError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid resolver configuration.
    #[error("Invalid resolver configuration: {0}")]
    InvalidConfig(String),

    /// The service base URL does not parse or cannot hold a path.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// The scanned code is empty or malformed.
    #[error(transparent)]
    InvalidCode(#[from] ValidationError),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request could not be sent or the response not read.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The response body is not a product record.
    #[error("Invalid response body: {0}")]
    Parse(String),

    // =========================================================================
    // Service Errors
    // =========================================================================
    /// The lookup answered something other than 200 or 404.
    #[error("Service answered HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// The service refused to register an unknown code.
    #[error("Product {code} could not be registered")]
    RegistrationRejected { code: String },

    /// Registration succeeded but the lookup still answers 404.
    #[error("Product {code} is still unknown after registration")]
    StillMissing { code: String },
}

impl ResolverError {
    /// True for failures of the network itself rather than of the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, ResolverError::Transport(_) | ResolverError::Timeout)
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ResolverError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResolverError::Timeout
        } else if err.is_decode() {
            ResolverError::Parse(err.to_string())
        } else {
            ResolverError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ResolverError {
    fn from(err: serde_json::Error) -> Self {
        ResolverError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for ResolverError {
    fn from(err: url::ParseError) -> Self {
        ResolverError::InvalidUrl(err.to_string())
    }
}
