//! # Product Service Client
//!
//! One method per endpoint. No retries here; sequencing lives in
//! [`ProductResolver`](crate::resolver::ProductResolver).
//!
//! ## Endpoint Construction
//! ```text
//! base_url                         lookup URL
//! ───────────────────────────────  ─────────────────────────────────────
//! https://host:8443                https://host:8443/products/{code}
//! https://host:8443/api/           https://host:8443/api/products/{code}
//!
//! register URL: {base}/products/?barcode={code}
//! ```
//! The code is pushed as a path segment, so it is percent-encoded.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::config::ResolverConfig;
use crate::error::{ResolverError, ResolverResult};
use crate::protocol::{Lookup, ProductRecord};

/// HTTP client for the product service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ProductApi {
    http: reqwest::Client,
    base_url: Url,
}

impl ProductApi {
    /// Builds a client from a validated configuration.
    pub fn new(config: &ResolverConfig) -> ResolverResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ResolverError::InvalidConfig(e.to_string()))?;

        Ok(ProductApi {
            http,
            base_url: config.base()?,
        })
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {base}/products/{code}`.
    pub async fn fetch_product(&self, code: &str) -> ResolverResult<Lookup> {
        let url = self.endpoint(&["products", code])?;
        debug!(%url, "Looking up product");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                let record: ProductRecord = serde_json::from_str(&body)?;
                Ok(Lookup::Found(record))
            }
            StatusCode::NOT_FOUND => Ok(Lookup::NotFound),
            status => {
                warn!(code = %code, status = status.as_u16(), "Unexpected lookup status");
                Ok(Lookup::Unexpected(status.as_u16()))
            }
        }
    }

    /// `POST {base}/products/?barcode={code}` with an empty body.
    ///
    /// Returns true when the service answers 200 or 201.
    pub async fn register_product(&self, code: &str) -> ResolverResult<bool> {
        let mut url = self.endpoint(&["products", ""])?;
        url.query_pairs_mut().append_pair("barcode", code);
        debug!(%url, "Registering product");

        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            Ok(true)
        } else {
            warn!(code = %code, status = status.as_u16(), "Registration refused");
            Ok(false)
        }
    }

    fn endpoint(&self, segments: &[&str]) -> ResolverResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ResolverError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
