//! Type-safe price representation using decimal arithmetic.
//!
//! The RocketShoes catalog serves prices as plain JSON numbers in BRL, so
//! `Price` is serde-transparent over a [`Decimal`] (float encoding) and
//! formats itself the Brazilian way (`R$ 139,90`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in Brazilian reais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., `R$ 139,90`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("R$ {:.2}", self.0).replace('.', ",")
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::ops::Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}
