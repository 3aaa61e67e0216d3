//! Remote catalog and stock lookup.
//!
//! The storefront talks to a plain REST service:
//!
//! - `GET {base}/products/{id}` -> product record
//! - `GET {base}/stock/{id}` -> `{ "id": .., "amount": .. }`
//!
//! [`CatalogService`] is the seam the cart store is generic over, so tests
//! and alternative backends can inject their own implementation.
//! [`HttpCatalog`] is the production `reqwest` implementation.

mod client;

pub use client::HttpCatalog;

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::types::{Product, Stock};

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The catalog returned a record without a valid identifier.
    #[error("Invalid product record for id {0}")]
    InvalidProduct(ProductId),
}

/// Read-only access to the remote catalog and its stock levels.
///
/// Every call is a fresh network round trip - no caching, no retry.
#[allow(async_fn_in_trait)]
pub trait CatalogService {
    /// Fetch a product record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the record is malformed.
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock, CatalogError>;
}
