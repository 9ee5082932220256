//! Cart operations over the session store.
//!
//! Every operation loads the stored cart, runs it through the reconciler,
//! and persists the validated result back, so a cart can never be observed
//! with stale prices or quantities above finite stock.

use serde::Deserialize;
use tracing::instrument;

use clickfit_core::ProductId;

use crate::models::cart::{CartKey, CartLine};
use crate::services::reconcile::{self, CartError, ReconciledCart, StockPolicy};
use crate::stores::carts::CartStore;
use crate::stores::catalog::{CatalogError, CatalogStore};

/// One entry of a bulk cart update payload.
///
/// `quantity` is signed on the wire: zero and negative values mean
/// "remove this line" and are dropped silently rather than rejected.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CartUpdateEntry {
    pub id: ProductId,
    pub quantity: i64,
}

/// Reconcile and return the visitor's cart (read path).
///
/// Over-stock quantities are clamped with a notice; vanished products are
/// dropped with a notice. The validated cart is persisted back to the
/// session store.
#[instrument(skip(catalog, carts))]
pub fn view_cart(
    catalog: &dyn CatalogStore,
    carts: &dyn CartStore,
    key: &CartKey,
) -> ReconciledCart {
    let stored = carts.get_cart(key);
    // Clamp never fails.
    let cart = reconcile::reconcile(&stored, catalog, StockPolicy::Clamp)
        .unwrap_or(ReconciledCart {
            lines: Vec::new(),
            notices: Vec::new(),
        });
    carts.put_cart(key, cart.lines.clone());
    cart
}

/// Add `quantity` units of a product to the cart.
///
/// Merges into an existing line for the same product (no duplicate lines);
/// the merged quantity is checked against stock as a whole. The rest of the
/// cart is then revalidated with the clamp policy so the persisted cart
/// stays within stock everywhere.
///
/// # Errors
///
/// - [`CartError::MalformedPayload`] if `quantity` is zero or the merged
///   quantity overflows
/// - [`CartError::ProductUnavailable`] if the product is missing or inactive
/// - [`CartError::InsufficientStock`] if the merged quantity exceeds finite
///   stock, carrying the available quantity
#[instrument(skip(catalog, carts))]
pub fn add_item(
    catalog: &dyn CatalogStore,
    carts: &dyn CartStore,
    key: &CartKey,
    product_id: ProductId,
    quantity: u32,
) -> Result<ReconciledCart, CartError> {
    if quantity == 0 {
        return Err(CartError::MalformedPayload(
            "quantity must be at least 1".to_owned(),
        ));
    }

    let product = catalog.get_active_product(product_id).map_err(|e| match e {
        CatalogError::NotFound(id) => CartError::ProductUnavailable {
            product_id: id,
            name: String::new(),
        },
        other => CartError::MalformedPayload(other.to_string()),
    })?;

    let mut lines = carts.get_cart(key);
    let requested = lines
        .iter()
        .find(|line| line.id == product_id)
        .map_or(Some(quantity), |line| line.quantity.checked_add(quantity))
        .ok_or_else(|| CartError::MalformedPayload("quantity too large".to_owned()))?;

    if let Some(stock) = product.stock
        && requested > stock
    {
        return Err(CartError::InsufficientStock {
            product_id,
            name: product.name,
            available: stock,
        });
    }

    match lines.iter_mut().find(|line| line.id == product_id) {
        Some(line) => line.quantity = requested,
        None => lines.push(CartLine::for_product(&product, requested)),
    }

    // The added line is now valid; bring the rest of the cart along.
    let cart = reconcile::reconcile(&lines, catalog, StockPolicy::Clamp)
        .unwrap_or(ReconciledCart {
            lines,
            notices: Vec::new(),
        });
    carts.put_cart(key, cart.lines.clone());
    Ok(cart)
}

/// Replace the whole cart from a bulk payload.
///
/// Entries with zero or negative quantity are dropped silently (treated as
/// removal). Duplicate product ids in one payload: the last occurrence
/// wins. Any unavailable product or over-stock quantity rejects the whole
/// update and leaves the stored cart untouched.
///
/// # Errors
///
/// [`CartError::ProductUnavailable`] or [`CartError::InsufficientStock`]
/// for the first offending entry.
#[instrument(skip(catalog, carts, entries))]
pub fn update_cart(
    catalog: &dyn CatalogStore,
    carts: &dyn CartStore,
    key: &CartKey,
    entries: &[CartUpdateEntry],
) -> Result<ReconciledCart, CartError> {
    // Last occurrence wins, preserving first-seen position.
    let mut requested: Vec<(ProductId, u32)> = Vec::new();
    for entry in entries {
        let Ok(quantity) = u32::try_from(entry.quantity) else {
            // Negative: treat as removal.
            requested.retain(|(id, _)| *id != entry.id);
            continue;
        };
        match requested.iter_mut().find(|(id, _)| *id == entry.id) {
            Some(slot) => slot.1 = quantity,
            None => requested.push((entry.id, quantity)),
        }
    }
    requested.retain(|&(_, quantity)| quantity > 0);

    let draft: Vec<CartLine> = {
        let mut draft = Vec::with_capacity(requested.len());
        for (id, quantity) in requested {
            let product = catalog.get_active_product(id).map_err(|_| {
                CartError::ProductUnavailable {
                    product_id: id,
                    name: String::new(),
                }
            })?;
            if let Some(stock) = product.stock
                && quantity > stock
            {
                return Err(CartError::InsufficientStock {
                    product_id: id,
                    name: product.name,
                    available: stock,
                });
            }
            draft.push(CartLine::for_product(&product, quantity));
        }
        draft
    };

    carts.put_cart(key, draft.clone());
    Ok(ReconciledCart {
        lines: draft,
        notices: Vec::new(),
    })
}

/// Remove a product's line from the cart. No quantity check; removing a
/// product that is not in the cart is a no-op.
#[instrument(skip(catalog, carts))]
pub fn remove_item(
    catalog: &dyn CatalogStore,
    carts: &dyn CartStore,
    key: &CartKey,
    product_id: ProductId,
) -> ReconciledCart {
    let mut lines = carts.get_cart(key);
    lines.retain(|line| line.id != product_id);
    let cart = reconcile::reconcile(&lines, catalog, StockPolicy::Clamp)
        .unwrap_or(ReconciledCart {
            lines,
            notices: Vec::new(),
        });
    carts.put_cart(key, cart.lines.clone());
    cart
}

/// Units currently in the stored cart. Served from the stored cart without
/// a reconciliation pass (badge counter).
#[must_use]
pub fn cart_count(carts: &dyn CartStore, key: &CartKey) -> u32 {
    carts.get_cart(key).iter().map(|line| line.quantity).sum()
}
