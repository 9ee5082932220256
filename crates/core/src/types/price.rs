//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below the catalog minimum of 0.01.
    #[error("price must be at least 0.01, got {amount}")]
    BelowMinimum {
        /// The rejected amount.
        amount: Decimal,
    },
}

/// A catalog price.
///
/// Prices use [`Decimal`] arithmetic (never floats) and are serialized as
/// decimal strings on the wire, e.g. `"19.99"`. The store is single-currency,
/// so no currency code is carried.
///
/// ## Constraints
///
/// - Amount ≥ 0.01 (free products are not representable)
///
/// ## Examples
///
/// ```
/// use clickfit_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(1999, 2)).unwrap();
/// assert_eq!(price.to_string(), "$19.99");
/// assert!(Price::new(Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Price {
    /// Minimum representable price (one cent).
    pub const MIN: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::BelowMinimum`] if `amount` is less than 0.01.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Self::MIN {
            return Err(PriceError::BelowMinimum { amount });
        }
        Ok(Self(amount.round_dp(2)))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line subtotal for `quantity` units, rounded to cents.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        (self.0 * Decimal::from(quantity)).round_dp(2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}
