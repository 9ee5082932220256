//! Session cart types.
//!
//! Cart state lives in server-side session storage, not the catalog
//! database. The session itself holds only an opaque [`CartKey`]; the
//! lines are stored behind the [`CartStore`](crate::stores::CartStore)
//! contract keyed by it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clickfit_core::{Price, ProductId};

use super::product::Product;

/// Opaque per-visitor cart key.
///
/// Generated once per session and stored in the session cookie's backing
/// record. No cross-session visibility: a key only ever resolves to the
/// cart it was created for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartKey(String);

impl CartKey {
    /// Generate a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CartKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One line of a visitor's cart.
///
/// `price` and `name` are display snapshots refreshed from the live product
/// on every reconciliation; client-supplied values are never trusted. The
/// wire shape is `{id, name, price, image, quantity}` with the price as a
/// decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to. At most one line per product id.
    pub id: ProductId,
    /// Cached display name.
    pub name: String,
    /// Cached unit price snapshot.
    pub price: Price,
    /// Cached image URL, possibly empty.
    pub image: String,
    /// Units requested; always positive, and never above finite stock
    /// after reconciliation.
    pub quantity: u32,
}

impl CartLine {
    /// Build a line for `quantity` units of `product`, caching its current
    /// display fields.
    #[must_use]
    pub fn for_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image_url.clone(),
            quantity,
        }
    }

    /// Line subtotal: unit price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        assert_ne!(CartKey::generate(), CartKey::generate());
    }

    #[test]
    fn line_wire_shape() {
        let line = CartLine {
            id: ProductId::new(3),
            name: "Belt".to_owned(),
            price: Price::new(Decimal::new(1500, 2)).expect("valid price"),
            image: String::new(),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "Belt",
                "price": "15.00",
                "image": "",
                "quantity": 2
            })
        );
        assert_eq!(line.subtotal(), Decimal::new(3000, 2));
    }
}
