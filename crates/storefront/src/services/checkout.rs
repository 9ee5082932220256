//! Checkout: the only path from a session cart to a persisted order.
//!
//! Commit is all-or-nothing. The cart is re-validated under the strict
//! stock policy, every line's stock is decremented, and only then is the
//! order written and the cart cleared. A decrement that fails partway
//! restocks everything already taken so a competing checkout sees
//! consistent inventory.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use clickfit_core::{Email, EmailError, PaymentMethod, ProductId};

use crate::models::cart::CartKey;
use crate::models::order::{NewOrder, Order};
use crate::services::notify::{send_best_effort, Notification, Notifier};
use crate::services::reconcile::{reconcile, CartError, StockPolicy};
use crate::stores::carts::CartStore;
use crate::stores::catalog::{CatalogError, CatalogStore};
use crate::stores::orders::OrderStore;

/// Customer-submitted checkout form.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to commit: the session cart had no usable lines.
    #[error("your cart is empty")]
    EmptyCart,

    /// A required form field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Pre-commit validation rejected the cart.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Stock moved between validation and commit; the commit was rolled
    /// back and nothing was decremented.
    #[error("only {available} items available for {name}")]
    StockConflict {
        product_id: ProductId,
        name: String,
        available: u32,
    },
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed)
}

/// Commit the session cart identified by `key` as a new order.
///
/// Steps, in order:
///
/// 1. Validate the form fields and email.
/// 2. Load the stored cart; empty fails with [`CheckoutError::EmptyCart`].
/// 3. Reconcile under [`StockPolicy::Reject`]: any vanished product or
///    over-stock quantity fails the whole submission.
/// 4. Decrement stock for every line. On the first failure, restock the
///    lines already decremented and fail with
///    [`CheckoutError::StockConflict`]; inventory is left exactly as
///    found.
/// 5. Persist the order with a frozen snapshot of the reconciled lines.
/// 6. Clear the session cart.
/// 7. Send the admin and customer notifications, best-effort.
///
/// # Errors
///
/// Any failure before step 5 leaves the stored cart and inventory
/// untouched. Steps 5 onward cannot fail.
#[instrument(skip(request, catalog, carts, orders, notifier), fields(key = %key.as_str()))]
pub fn place_order(
    key: &CartKey,
    request: CheckoutRequest,
    catalog: &dyn CatalogStore,
    carts: &dyn CartStore,
    orders: &dyn OrderStore,
    notifier: &dyn Notifier,
) -> Result<Order, CheckoutError> {
    let customer_name = required(&request.customer_name, "name")?.to_owned();
    let phone = required(&request.phone, "phone")?.to_owned();
    let address = required(&request.address, "address")?.to_owned();
    let email = Email::parse_normalized(&request.email)?;

    let stored = carts.get_cart(key);
    if stored.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let reconciled = reconcile(&stored, catalog, StockPolicy::Reject)?;
    if reconciled.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    // Take stock line by line; undo everything on the first refusal.
    let mut taken: Vec<(ProductId, u32)> = Vec::with_capacity(reconciled.lines.len());
    for line in &reconciled.lines {
        match catalog.decrement_stock(line.id, line.quantity) {
            Ok(()) => taken.push((line.id, line.quantity)),
            Err(error) => {
                for &(id, quantity) in taken.iter().rev() {
                    catalog.restock(id, quantity);
                }
                let available = match error {
                    CatalogError::InsufficientStock { available, .. } => available,
                    _ => 0,
                };
                return Err(CheckoutError::StockConflict {
                    product_id: line.id,
                    name: line.name.clone(),
                    available,
                });
            }
        }
    }

    let total = reconciled.total();
    let order = orders.insert(NewOrder {
        customer_name,
        email,
        phone,
        address,
        payment_method: request.payment_method,
        line_items: reconciled.lines,
        total,
        shipping_cost: request.shipping_cost,
        tax_amount: request.tax_amount,
        discount_amount: request.discount_amount,
        notes: request.notes,
    });

    carts.clear_cart(key);

    send_best_effort(notifier, &Notification::OrderPlaced(order.clone()));
    send_best_effort(notifier, &Notification::OrderConfirmation(order.clone()));

    tracing::info!(order_id = %order.id, total = %order.final_total, "order committed");
    Ok(order)
}
