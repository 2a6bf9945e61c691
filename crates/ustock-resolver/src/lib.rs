//! # ustock-resolver: Barcode → Product Resolution
//!
//! Resolves a scanned barcode into a product record using the UStock
//! product service.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Resolution                               │
//! │                                                                         │
//! │  scan "3017620422003"                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /products/3017620422003                                           │
//! │       │                                                                 │
//! │       ├── 200 ──────────────────────────────► ProductRecord            │
//! │       │                                                                 │
//! │       ├── 404                                                          │
//! │       │    │                                                            │
//! │       │    ▼                                                            │
//! │       │  POST /products/?barcode=3017620422003                         │
//! │       │    │                                                            │
//! │       │    ├── 200/201 ──► GET /products/3017620422003 ──► 200 ──► ✓   │
//! │       │    │                                                            │
//! │       │    └── other ─────────────────────────────────────────► ✗     │
//! │       │                                                                 │
//! │       └── other / transport error / bad JSON ─────────────────► ✗     │
//! │                                                                         │
//! │  ✗ = no result. The caller shows a notice and nothing is persisted.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Background Execution
//!
//! [`ResolveTask::spawn`] runs a resolution on a tokio task. The returned
//! [`ResolveHandle`] is the only way to observe the result; cancelling or
//! dropping it tears the task down and no result is ever delivered.
//!
//! ```rust,ignore
//! let resolver = ProductResolver::new(ProductApi::new(&ResolverConfig::default())?);
//! let handle = ResolveTask::spawn(resolver, "3017620422003");
//! if let Some(Ok(product)) = handle.outcome().await {
//!     println!("{}", product.product_name);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod resolver;
pub mod task;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::ProductApi;
pub use config::{ResolverConfig, DEFAULT_API_URL};
pub use error::{ResolverError, ResolverResult};
pub use protocol::{Lookup, ProductRecord};
pub use resolver::ProductResolver;
pub use task::{ResolveHandle, ResolveTask};
