//! Session cart store.
//!
//! Carts are keyed by the opaque [`CartKey`] held in the visitor's session.
//! The store has no cross-key visibility and no ordering guarantees across
//! concurrent requests for the same key: last write wins, which matches
//! how two browser tabs already race on one session.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::cart::{CartKey, CartLine};

/// Session-cart contract used by every cart entry point.
///
/// Implementations hold the only authoritative copy of a visitor's cart;
/// there is no per-request cache in front of them.
pub trait CartStore: Send + Sync {
    /// Fetch the cart for `key`; an unknown key is an empty cart.
    fn get_cart(&self, key: &CartKey) -> Vec<CartLine>;

    /// Replace the cart for `key`.
    fn put_cart(&self, key: &CartKey, lines: Vec<CartLine>);

    /// Drop the cart for `key` entirely.
    fn clear_cart(&self, key: &CartKey);
}

/// In-memory cart store.
#[derive(Default)]
pub struct MemoryCartStore {
    carts: RwLock<HashMap<CartKey, Vec<CartLine>>>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn get_cart(&self, key: &CartKey) -> Vec<CartLine> {
        self.carts
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    fn put_cart(&self, key: &CartKey, lines: Vec<CartLine>) {
        self.carts
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.clone(), lines);
    }

    fn clear_cart(&self, key: &CartKey) {
        self.carts
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use clickfit_core::{Price, ProductId};

    use super::*;

    fn line(id: i32, quantity: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            price: Price::new(Decimal::new(1000, 2)).unwrap(),
            image: String::new(),
            quantity,
        }
    }

    #[test]
    fn unknown_key_is_empty_cart() {
        let store = MemoryCartStore::new();
        assert!(store.get_cart(&CartKey::generate()).is_empty());
    }

    #[test]
    fn put_then_get_round_trips() {
        let store = MemoryCartStore::new();
        let key = CartKey::generate();
        store.put_cart(&key, vec![line(1, 2), line(2, 1)]);
        assert_eq!(store.get_cart(&key), vec![line(1, 2), line(2, 1)]);
    }

    #[test]
    fn keys_are_isolated() {
        let store = MemoryCartStore::new();
        let a = CartKey::generate();
        let b = CartKey::generate();
        store.put_cart(&a, vec![line(1, 1)]);
        assert!(store.get_cart(&b).is_empty());
    }

    #[test]
    fn clear_empties_the_cart() {
        let store = MemoryCartStore::new();
        let key = CartKey::generate();
        store.put_cart(&key, vec![line(1, 1)]);
        store.clear_cart(&key);
        assert!(store.get_cart(&key).is_empty());
    }
}
