//! Checkout route handler.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use clickfit_core::{OrderId, PaymentMethod};

use crate::error::Result;
use crate::models::session::keys;
use crate::routes::cart::cart_key;
use crate::services::checkout::{self, CheckoutRequest};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub shipping_cost: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: OrderId,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_total: Decimal,
}

/// Commit the session cart as an order.
#[instrument(skip(state, session, body))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CheckoutBody>,
) -> Result<Json<CheckoutResponse>> {
    let key = cart_key(&session).await?;
    let order = checkout::place_order(
        &key,
        CheckoutRequest {
            customer_name: body.customer_name,
            email: body.email,
            phone: body.phone,
            address: body.address,
            payment_method: body.payment_method,
            shipping_cost: body.shipping_cost,
            tax_amount: body.tax_amount,
            discount_amount: body.discount_amount,
            notes: body.notes,
        },
        state.catalog(),
        state.carts(),
        state.orders(),
        state.notifier(),
    )?;

    // Remembered for the order success page; losing it is harmless.
    if let Err(e) = session.insert(keys::LAST_ORDER_ID, order.id).await {
        tracing::warn!(error = %e, "failed to store last order id in session");
    }

    Ok(Json(CheckoutResponse {
        success: true,
        order_id: order.id,
        final_total: order.final_total,
    }))
}
