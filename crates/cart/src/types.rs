//! Cart domain types.
//!
//! Field names match the catalog service's JSON payloads, and the persisted
//! cart is the serialized array of [`CartItem`] - the same shape the
//! storefront has always written under its storage key.

use rocketshoes_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// A product as served by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

/// Available stock for a product, fetched on demand and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// A cart entry: a product plus the quantity in the cart (always >= 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartItem {
    /// Create a cart entry for a freshly added product.
    #[must_use]
    pub const fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    /// Line total for this entry.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price * self.amount
    }
}

/// Requested quantity change for a product already in the cart.
///
/// The amount is signed so that non-positive requests can be expressed
/// (and ignored) rather than rejected at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: Price::new(Decimal::new(17990, 2)),
            image: "https://example.com/shoe.jpg".to_string(),
        }
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::new(sample_product(), 2);
        let json = serde_json::to_value(&item).unwrap();

        // The persisted shape spreads the product fields alongside `amount`.
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Tênis de Caminhada Leve Confortável");
        assert_eq!(json["amount"], 2);
        assert!(json.get("product").is_none());
    }

    #[test]
    fn test_cart_item_roundtrip() {
        let item = CartItem::new(sample_product(), 3);
        let json = serde_json::to_string(&item).unwrap();
        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_subtotal() {
        let item = CartItem::new(sample_product(), 2);
        assert_eq!(item.subtotal().amount(), Decimal::new(35980, 2));
    }
}
