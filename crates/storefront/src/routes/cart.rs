//! Cart route handlers.
//!
//! The session holds only an opaque cart key; cart lines live in the cart
//! store. Every read or mutation revalidates the stored lines against the
//! live catalog before anything is returned to the client.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use clickfit_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::cart::{CartKey, CartLine};
use crate::models::session::keys;
use crate::services::cart::{self, CartUpdateEntry};
use crate::services::reconcile::{CartNotice, ReconciledCart};
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart key from the session, creating one on first use.
pub async fn cart_key(session: &Session) -> Result<CartKey> {
    if let Some(key) = session
        .get::<CartKey>(keys::CART_KEY)
        .await
        .map_err(|e| AppError::Internal(format!("session read failed: {e}")))?
    {
        return Ok(key);
    }
    let key = CartKey::generate();
    session
        .insert(keys::CART_KEY, &key)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    Ok(key)
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartBody {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Bulk cart update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartBody {
    pub cart: Vec<CartUpdateEntry>,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartBody {
    pub product_id: ProductId,
}

/// Validated cart response.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub items: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub count: u32,
    pub notices: Vec<CartNotice>,
}

impl From<ReconciledCart> for CartResponse {
    fn from(cart: ReconciledCart) -> Self {
        Self {
            success: true,
            total: cart.total(),
            count: cart.count(),
            items: cart.lines,
            notices: cart.notices,
        }
    }
}

/// Cart count badge response.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: u32,
}

/// Display the validated cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartResponse>> {
    let key = cart_key(&session).await?;
    let cart = cart::view_cart(state.catalog(), state.carts(), &key);
    Ok(Json(cart.into()))
}

/// Add an item to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddToCartBody>,
) -> Result<Json<CartResponse>> {
    let key = cart_key(&session).await?;
    let cart = cart::add_item(
        state.catalog(),
        state.carts(),
        &key,
        body.product_id,
        body.quantity.unwrap_or(1),
    )?;
    Ok(Json(cart.into()))
}

/// Replace cart quantities in bulk.
#[instrument(skip(state, session, body))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<UpdateCartBody>,
) -> Result<Json<CartResponse>> {
    let key = cart_key(&session).await?;
    let cart = cart::update_cart(state.catalog(), state.carts(), &key, &body.cart)?;
    Ok(Json(cart.into()))
}

/// Remove a product's line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RemoveFromCartBody>,
) -> Result<Json<CartResponse>> {
    let key = cart_key(&session).await?;
    let cart = cart::remove_item(state.catalog(), state.carts(), &key, body.product_id);
    Ok(Json(cart.into()))
}

/// Get the cart count badge.
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartCountResponse>> {
    let key = cart_key(&session).await?;
    let count = cart::cart_count(state.carts(), &key);
    Ok(Json(CartCountResponse { count }))
}
