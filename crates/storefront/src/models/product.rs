//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clickfit_core::{Price, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Menswear,
    Womenswear,
    Electronics,
    Accessories,
}

impl Category {
    /// Three-letter uppercase prefix used in generated SKUs.
    #[must_use]
    pub const fn sku_prefix(self) -> &'static str {
        match self {
            Self::Menswear => "MEN",
            Self::Womenswear => "WOM",
            Self::Electronics => "ELE",
            Self::Accessories => "ACC",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Menswear => "Menswear",
            Self::Womenswear => "Womenswear",
            Self::Electronics => "Electronics",
            Self::Accessories => "Accessories",
        };
        write!(f, "{s}")
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: Price,
    /// Product image URL, possibly empty.
    pub image_url: String,
    /// Units on hand; `None` means unlimited.
    pub stock: Option<u32>,
    /// Inactive products are invisible to the cart and listings.
    pub is_active: bool,
    /// Stock-keeping unit, generated at insert time when not supplied.
    pub sku: String,
    /// Mean of approved review ratings, one decimal place.
    pub rating: Decimal,
    /// Count of approved reviews.
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether any units are available (unlimited stock counts as available).
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_none_or(|s| s > 0)
    }

    /// Whether finite stock has fallen to 10 units or fewer (but not zero).
    #[must_use]
    pub fn low_stock(&self) -> bool {
        self.stock.is_some_and(|s| (1..=10).contains(&s))
    }
}

/// Input for inserting a product into the catalog.
///
/// The catalog assigns the ID and, when `sku` is `None`, generates one from
/// the category prefix and the assigned ID (e.g. `ELE-4`).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: Price,
    pub image_url: String,
    pub stock: Option<u32>,
    pub is_active: bool,
    pub sku: Option<String>,
}
