//! # Service Protocol
//!
//! Wire types of the product service.
//!
//! ```text
//! GET /products/{code}
//!   200 → {"id": 7, "barcode": "333", "product_name": "Bread",
//!          "brand": "Acme", "content_size": "500 g",
//!          "nutriscore": "b", "image_url": "https://..."}
//!   404 → unknown code
//!
//! POST /products/?barcode={code}   (empty body)
//!   200 / 201 → registered
//! ```

use serde::{Deserialize, Serialize};

/// A product as served by the lookup endpoint.
///
/// Only `product_name` is required; every other field may be missing or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub barcode: Option<String>,

    pub product_name: String,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub content_size: Option<String>,

    #[serde(default)]
    pub nutriscore: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// Creates a record with only a name.
    pub fn named(product_name: impl Into<String>) -> Self {
        ProductRecord {
            id: None,
            barcode: None,
            product_name: product_name.into(),
            brand: None,
            content_size: None,
            nutriscore: None,
            image_url: None,
        }
    }
}

/// Outcome of a single lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// 200 with a product body.
    Found(ProductRecord),
    /// 404.
    NotFound,
    /// Any other status.
    Unexpected(u16),
}
