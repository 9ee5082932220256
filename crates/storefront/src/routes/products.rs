//! Product route handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clickfit_core::ProductId;

use crate::error::Result;
use crate::models::product::{Category, Product};
use crate::state::AppState;

/// Listing filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<Category>,
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// Display the product listing, newest first, optionally filtered by
/// category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<ProductListResponse> {
    let products = state.catalog().list_active(query.category);
    Json(ProductListResponse { products })
}

/// Display a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = state.catalog().get_active_product(id)?;
    Ok(Json(product))
}

/// The homepage featured strip: the four newest active products.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<ProductListResponse> {
    let products = state.catalog().featured();
    Json(ProductListResponse { products })
}
