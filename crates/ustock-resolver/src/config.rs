//! # Resolver Configuration
//!
//! Where the product service lives and how long to wait for it.
//!
//! ## Configuration File Format
//! ```toml
//! # [api] section of ustock.toml
//! base_url = "https://api.ustock.totooche.fr:8443"
//! timeout_secs = 10   # omit to use the HTTP client default
//! ```
//!
//! Loading the file and applying `USTOCK_*` overrides is the app's job; this
//! module only defines the section and validates it.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{ResolverError, ResolverResult};

/// Production product service.
pub const DEFAULT_API_URL: &str = "https://api.ustock.totooche.fr:8443";

/// Product service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the product service. Endpoints are appended to its path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. `None` keeps the client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration for the given base URL, without timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        ResolverConfig {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// The per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parses the base URL.
    pub fn base(&self) -> ResolverResult<Url> {
        let url = Url::parse(&self.base_url)?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ResolverError::InvalidUrl(format!(
                "Service URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        Ok(url)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ResolverResult<()> {
        self.base()?;

        if self.timeout_secs == Some(0) {
            return Err(ResolverError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
