//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type mapping domain errors onto HTTP
//! status codes and a JSON error body. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use clickfit_core::ProductId;

use crate::services::checkout::CheckoutError;
use crate::services::contact::ContactError;
use crate::services::newsletter::NewsletterError;
use crate::services::reconcile::CartError;
use crate::services::reviews::ReviewError;
use crate::stores::catalog::CatalogError;
use crate::stores::orders::OrderStoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart validation rejected the request.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Review intake failed.
    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    /// Newsletter operation failed.
    #[error("Newsletter error: {0}")]
    Newsletter(#[from] NewsletterError),

    /// Contact form submission failed.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Order lookup or transition failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderStoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body. Stock rejections carry the offending product and the
/// quantity actually available so the client can adjust the cart.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<u32>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Cart(err) => cart_status(err),
            Self::Checkout(err) => match err {
                CheckoutError::Cart(inner) => cart_status(inner),
                CheckoutError::StockConflict { .. } => StatusCode::CONFLICT,
                CheckoutError::EmptyCart
                | CheckoutError::MissingField(_)
                | CheckoutError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            },
            Self::Catalog(err) => match err {
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::InsufficientStock { .. } | CatalogError::DuplicateReview(_) => {
                    StatusCode::CONFLICT
                }
                CatalogError::InvalidRating(_) => StatusCode::BAD_REQUEST,
            },
            Self::Review(err) => match err {
                ReviewError::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
                ReviewError::Catalog(CatalogError::DuplicateReview(_)) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Newsletter(err) => match err {
                NewsletterError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                NewsletterError::NotSubscribed => StatusCode::NOT_FOUND,
            },
            Self::Contact(err) => match err {
                ContactError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::Order(err) => match err {
                OrderStoreError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderStoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Offending product and available quantity, for stock rejections.
    fn stock_context(&self) -> (Option<ProductId>, Option<u32>) {
        let cart = match self {
            Self::Cart(err) | Self::Checkout(CheckoutError::Cart(err)) => err,
            Self::Checkout(CheckoutError::StockConflict {
                product_id,
                available,
                ..
            }) => return (Some(*product_id), Some(*available)),
            Self::Catalog(CatalogError::InsufficientStock {
                product_id,
                available,
            }) => return (Some(*product_id), Some(*available)),
            _ => return (None, None),
        };
        match cart {
            CartError::InsufficientStock {
                product_id,
                available,
                ..
            } => (Some(*product_id), Some(*available)),
            CartError::ProductUnavailable { product_id, .. } => (Some(*product_id), None),
            CartError::MalformedPayload(_) => (None, None),
        }
    }
}

fn cart_status(err: &CartError) -> StatusCode {
    match err {
        CartError::ProductUnavailable { .. } | CartError::InsufficientStock { .. } => {
            StatusCode::CONFLICT
        }
        CartError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        // Don't expose internal error details to clients
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let (product_id, available) = self.stock_context();
        let body = ErrorBody {
            success: false,
            error: message,
            product_id,
            available,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::InsufficientStock {
                product_id: ProductId::new(1),
                name: "Jacket".to_string(),
                available: 2,
            })),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn stock_rejection_carries_product_and_available() {
        let err = AppError::Cart(CartError::InsufficientStock {
            product_id: ProductId::new(7),
            name: "Jacket".to_string(),
            available: 2,
        });
        assert_eq!(err.stock_context(), (Some(ProductId::new(7)), Some(2)));
    }

    #[test]
    fn commit_time_stock_conflict_carries_product_and_available() {
        let err = AppError::Checkout(CheckoutError::StockConflict {
            product_id: ProductId::new(3),
            name: "Jacket".to_string(),
            available: 1,
        });
        assert_eq!(err.stock_context(), (Some(ProductId::new(3)), Some(1)));
        assert_eq!(get_status(err), StatusCode::CONFLICT);
    }
}
