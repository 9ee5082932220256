//! Cart reconciliation against live catalog state.
//!
//! A client-held cart is only ever a claim; prices, names, and stock levels
//! move underneath it. Every cart entry point (view, add, update, remove,
//! checkout) runs the same pass: drop lines whose products vanished, bring
//! quantities within finite stock, and refresh the cached display fields
//! from the live product. What differs per entry point is only the
//! [`StockPolicy`] applied when a quantity exceeds stock.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use clickfit_core::ProductId;

use crate::models::cart::CartLine;
use crate::stores::catalog::{CatalogError, CatalogStore};

/// What to do when a line's quantity exceeds finite stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockPolicy {
    /// Clamp the quantity to what is available and continue (cart view).
    /// Unavailable products are silently dropped with a notice.
    Clamp,
    /// Fail the whole operation (checkout submit, add, bulk update),
    /// naming the product and the available quantity.
    Reject,
}

/// Adjustment made to a cart during reconciliation, surfaced to the caller
/// so the visitor can be told what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartNotice {
    /// The product no longer exists or was deactivated; its line was
    /// removed. `name` is the last cached display name.
    RemovedUnavailable { product_id: ProductId, name: String },
    /// The requested quantity exceeded stock and was clamped down.
    StockClamped {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
}

/// Cart validation failures, surfaced as structured rejections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product is missing or inactive, in a context that rejects
    /// rather than drops.
    #[error("{name} is no longer available")]
    ProductUnavailable { product_id: ProductId, name: String },

    /// Requested quantity exceeds stock, in a context that rejects rather
    /// than clamps.
    #[error("only {available} items available for {name}")]
    InsufficientStock {
        product_id: ProductId,
        name: String,
        available: u32,
    },

    /// The submitted cart payload is missing required fields or otherwise
    /// unusable.
    #[error("malformed cart payload: {0}")]
    MalformedPayload(String),
}

/// A cart that has been validated against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledCart {
    /// Surviving lines with refreshed price/name snapshots.
    pub lines: Vec<CartLine>,
    /// Adjustments made along the way (empty under `Reject` on success).
    pub notices: Vec<CartNotice>,
}

impl ReconciledCart {
    /// Sum of line subtotals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Validate `lines` against the catalog.
///
/// For each line, in order:
///
/// 1. Fetch the product. Missing or inactive: under [`StockPolicy::Clamp`]
///    the line is dropped with [`CartNotice::RemovedUnavailable`]; under
///    [`StockPolicy::Reject`] the whole operation fails with
///    [`CartError::ProductUnavailable`].
/// 2. If stock is finite and the quantity exceeds it: clamp with a
///    [`CartNotice::StockClamped`], or fail with
///    [`CartError::InsufficientStock`], per policy. A clamp down to zero
///    drops the line entirely.
/// 3. Refresh the cached price, name, and image from the live product;
///    client-supplied display fields are never trusted.
///
/// # Errors
///
/// Only under [`StockPolicy::Reject`]; `Clamp` always succeeds.
pub fn reconcile(
    lines: &[CartLine],
    catalog: &dyn CatalogStore,
    policy: StockPolicy,
) -> Result<ReconciledCart, CartError> {
    let mut validated = Vec::with_capacity(lines.len());
    let mut notices = Vec::new();

    for line in lines {
        let product = match catalog.get_active_product(line.id) {
            Ok(product) => product,
            Err(CatalogError::NotFound(_)) => match policy {
                StockPolicy::Clamp => {
                    notices.push(CartNotice::RemovedUnavailable {
                        product_id: line.id,
                        name: line.name.clone(),
                    });
                    continue;
                }
                StockPolicy::Reject => {
                    return Err(CartError::ProductUnavailable {
                        product_id: line.id,
                        name: line.name.clone(),
                    });
                }
            },
            // Other catalog errors cannot come from a lookup.
            Err(_) => continue,
        };

        let mut quantity = line.quantity;
        if let Some(stock) = product.stock
            && quantity > stock
        {
            match policy {
                StockPolicy::Clamp => {
                    notices.push(CartNotice::StockClamped {
                        product_id: product.id,
                        requested: quantity,
                        available: stock,
                    });
                    quantity = stock;
                }
                StockPolicy::Reject => {
                    return Err(CartError::InsufficientStock {
                        product_id: product.id,
                        name: product.name,
                        available: stock,
                    });
                }
            }
        }

        if quantity == 0 {
            // Clamped to exhausted stock; nothing left to keep.
            continue;
        }

        validated.push(CartLine::for_product(&product, quantity));
    }

    Ok(ReconciledCart {
        lines: validated,
        notices,
    })
}
