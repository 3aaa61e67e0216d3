//! HTTP implementation of the catalog service.

use rocketshoes_core::{Price, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::config::CatalogConfig;
use crate::types::{Product, Stock};

use super::{CatalogError, CatalogService};

/// `reqwest`-backed catalog client.
///
/// No auth, no retry, no request timeout: a hung call blocks only its own
/// future, which matches how the storefront has always behaved.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

/// Raw product record as served by the catalog.
///
/// The id is optional so that a record lacking one can be rejected as
/// invalid instead of failing as a generic parse error.
#[derive(Debug, Deserialize)]
struct ProductPayload {
    id: Option<i32>,
    title: String,
    price: Price,
    image: String,
}

/// Raw stock response; the service only guarantees `amount`.
#[derive(Debug, Deserialize)]
struct StockPayload {
    amount: u32,
}

impl HttpCatalog {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Issue a GET and return the response body on success.
    async fn get_text(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

impl CatalogService for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        let url = format!("{}/products/{product_id}", self.base_url);
        let body = self.get_text(&url).await?;

        let payload: ProductPayload =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        match payload.id {
            Some(id) if id > 0 => Ok(Product {
                id: ProductId::new(id),
                title: payload.title,
                price: payload.price,
                image: payload.image,
            }),
            _ => Err(CatalogError::InvalidProduct(product_id)),
        }
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        let url = format!("{}/stock/{product_id}", self.base_url);
        let body = self.get_text(&url).await?;

        let payload: StockPayload =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(Stock {
            id: product_id,
            amount: payload.amount,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = CatalogConfig {
            base_url: url::Url::parse("http://localhost:3333/").unwrap(),
        };
        let catalog = HttpCatalog::new(&config);
        assert_eq!(catalog.base_url, "http://localhost:3333");
    }

    #[test]
    fn test_product_payload_without_id_is_invalid() {
        let body = r#"{"title": "Tênis", "price": 139.9, "image": "shoe.jpg"}"#;
        let payload: ProductPayload = serde_json::from_str(body).unwrap();
        assert!(payload.id.is_none());
    }

    #[test]
    fn test_stock_payload_needs_only_amount() {
        let payload: StockPayload = serde_json::from_str(r#"{"amount": 3}"#).unwrap();
        assert_eq!(payload.amount, 3);

        // Extra fields from richer services are ignored.
        let payload: StockPayload = serde_json::from_str(r#"{"id": 1, "amount": 3}"#).unwrap();
        assert_eq!(payload.amount, 3);
    }
}
