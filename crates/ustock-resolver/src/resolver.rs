//! # Product Resolver
//!
//! GET → (404) POST → (200/201) GET. At most three requests per code.

use tracing::{debug, info, warn};
use ustock_core::validation::validate_barcode;

use crate::client::ProductApi;
use crate::error::{ResolverError, ResolverResult};
use crate::protocol::{Lookup, ProductRecord};

/// Resolves scanned codes into product records.
#[derive(Debug, Clone)]
pub struct ProductResolver {
    api: ProductApi,
}

impl ProductResolver {
    /// Creates a resolver over the given client.
    pub fn new(api: ProductApi) -> Self {
        ProductResolver { api }
    }

    /// The underlying client.
    pub fn api(&self) -> &ProductApi {
        &self.api
    }

    /// Resolves `code`, reporting why it failed.
    ///
    /// ## Errors
    /// - `InvalidCode` before any request for an empty or malformed code
    /// - `UnexpectedStatus` when a lookup answers neither 200 nor 404
    /// - `RegistrationRejected` when the POST answers neither 200 nor 201
    /// - `StillMissing` when the second lookup answers 404
    /// - `Transport`, `Timeout`, `Parse` from the requests themselves
    pub async fn try_resolve(&self, code: &str) -> ResolverResult<ProductRecord> {
        let code = code.trim();
        validate_barcode(code)?;

        match self.api.fetch_product(code).await? {
            Lookup::Found(record) => {
                debug!(code = %code, product = %record.product_name, "Product found");
                return Ok(record);
            }
            Lookup::NotFound => {}
            Lookup::Unexpected(status) => return Err(ResolverError::UnexpectedStatus { status }),
        }

        info!(code = %code, "Unknown product, requesting registration");
        if !self.api.register_product(code).await? {
            return Err(ResolverError::RegistrationRejected {
                code: code.to_string(),
            });
        }

        match self.api.fetch_product(code).await? {
            Lookup::Found(record) => {
                info!(code = %code, product = %record.product_name, "Product registered");
                Ok(record)
            }
            Lookup::NotFound => Err(ResolverError::StillMissing {
                code: code.to_string(),
            }),
            Lookup::Unexpected(status) => Err(ResolverError::UnexpectedStatus { status }),
        }
    }

    /// Resolves `code`, logging any failure and returning `None` for it.
    pub async fn resolve(&self, code: &str) -> Option<ProductRecord> {
        match self.try_resolve(code).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(code = %code, error = %e, "Product resolution failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::testing::{spawn_service, FAILING_CODE, PHANTOM_CODE};

    async fn resolver() -> (ProductResolver, std::sync::Arc<crate::testing::MockService>) {
        let (base, service) = spawn_service().await;
        let api = ProductApi::new(&ResolverConfig::new(base)).unwrap();
        (ProductResolver::new(api), service)
    }

    #[tokio::test]
    async fn test_unknown_code_is_registered_then_fetched() {
        let (resolver, service) = resolver().await;

        let record = resolver.try_resolve("111").await.unwrap();

        assert_eq!(record.product_name, "Milk");
        assert_eq!(service.post_count(), 1);
        assert_eq!(service.get_count(), 2);
    }

    #[tokio::test]
    async fn test_rejected_registration_yields_nothing() {
        let (resolver, service) = resolver().await;

        assert!(matches!(
            resolver.try_resolve("222").await,
            Err(ResolverError::RegistrationRejected { .. })
        ));
        assert_eq!(resolver.resolve("222").await, None);
        assert_eq!(service.post_count(), 2);
    }

    #[tokio::test]
    async fn test_lookup_server_error_yields_nothing() {
        let (resolver, service) = resolver().await;

        assert!(matches!(
            resolver.try_resolve(FAILING_CODE).await,
            Err(ResolverError::UnexpectedStatus { status: 500 })
        ));
        assert_eq!(resolver.resolve(FAILING_CODE).await, None);
        assert_eq!(service.post_count(), 0);
        assert_eq!(service.get_count(), 2);
    }

    #[tokio::test]
    async fn test_registered_but_still_missing_yields_nothing() {
        let (resolver, service) = resolver().await;

        assert!(matches!(
            resolver.try_resolve(PHANTOM_CODE).await,
            Err(ResolverError::StillMissing { code }) if code == PHANTOM_CODE
        ));
        assert_eq!(service.post_count(), 1);
        assert_eq!(service.get_count(), 2);

        assert_eq!(resolver.resolve(PHANTOM_CODE).await, None);
        assert_eq!(service.post_count(), 2);
        assert_eq!(service.get_count(), 4);
    }

    #[tokio::test]
    async fn test_known_code_skips_registration() {
        let (resolver, service) = resolver().await;

        let record = resolver.resolve("333").await.unwrap();

        assert_eq!(record.product_name, "Bread");
        assert_eq!(record.brand.as_deref(), Some("Acme"));
        assert_eq!(service.post_count(), 0);
        assert_eq!(service.get_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_code_sends_nothing() {
        let (resolver, service) = resolver().await;

        assert!(matches!(
            resolver.try_resolve("   ").await,
            Err(ResolverError::InvalidCode(_))
        ));
        assert_eq!(service.get_count(), 0);
    }

    #[tokio::test]
    async fn test_parse_failure_yields_nothing() {
        let (resolver, service) = resolver().await;

        assert_eq!(resolver.resolve("444").await, None);
        assert_eq!(service.post_count(), 0);
    }
}
