//! Product review domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clickfit_core::{Email, ProductId, ReviewId};

/// A customer review of a product.
///
/// One review per (product, email). Only approved reviews count toward the
/// product's aggregate rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReview {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub name: String,
    pub email: Email,
    /// Star rating, 1 through 5.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub name: String,
    pub email: Email,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub is_approved: bool,
}
