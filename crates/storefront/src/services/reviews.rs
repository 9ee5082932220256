//! Product review intake and moderation.
//!
//! Visitor submissions land unapproved and wait for moderation; only the
//! moderation path records an approved review, which is also the only
//! point at which a product's aggregate rating moves. Un-approving a
//! review later does not recompute the aggregate, so a rating can go
//! stale until the next approval; that is the established inbox workflow.

use thiserror::Error;
use tracing::instrument;

use clickfit_core::{Email, EmailError, ProductId};

use crate::models::review::{NewReview, ProductReview};
use crate::stores::catalog::{CatalogError, CatalogStore};

/// Visitor-submitted review form.
#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub product_id: ProductId,
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Store a visitor submission, pending moderation.
///
/// # Errors
///
/// Fails on blank name/comment, an unparseable email, a rating outside
/// 1..=5, an unknown product, or a duplicate review from the same email.
#[instrument(skip(submission, catalog), fields(product_id = %submission.product_id))]
pub fn submit_review(
    submission: ReviewSubmission,
    catalog: &dyn CatalogStore,
) -> Result<ProductReview, ReviewError> {
    let name = submission.name.trim();
    if name.is_empty() {
        return Err(ReviewError::MissingField("name"));
    }
    if submission.comment.trim().is_empty() {
        return Err(ReviewError::MissingField("comment"));
    }
    let email = Email::parse_normalized(&submission.email)?;

    let stored = catalog.add_review(NewReview {
        product_id: submission.product_id,
        name: name.to_owned(),
        email,
        rating: submission.rating,
        title: submission.title.trim().to_owned(),
        comment: submission.comment.trim().to_owned(),
        is_approved: false,
    })?;
    tracing::info!(review_id = %stored.id, "review submitted for moderation");
    Ok(stored)
}

/// Moderation path: store a review already marked approved, updating the
/// product's aggregate rating and review count.
///
/// # Errors
///
/// Same catalog rejections as [`submit_review`].
#[instrument(skip(review, catalog), fields(product_id = %review.product_id))]
pub fn record_approved_review(
    review: NewReview,
    catalog: &dyn CatalogStore,
) -> Result<ProductReview, ReviewError> {
    let approved = NewReview {
        is_approved: true,
        ..review
    };
    let stored = catalog.add_review(approved)?;
    tracing::info!(review_id = %stored.id, "approved review recorded");
    Ok(stored)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use crate::stores::catalog::tests::new_product;
    use crate::stores::catalog::MemoryCatalog;

    use super::*;

    fn submission(product_id: ProductId, email: &str, rating: u8) -> ReviewSubmission {
        ReviewSubmission {
            product_id,
            name: "Grace".to_owned(),
            email: email.to_owned(),
            rating,
            title: "Solid".to_owned(),
            comment: "Does what it says.".to_owned(),
        }
    }

    #[test]
    fn submission_is_stored_unapproved_and_leaves_rating_alone() {
        let catalog = MemoryCatalog::new();
        let product = catalog.insert(new_product("Headphones", 4999, Some(5)));

        let review =
            submit_review(submission(product.id, "g@example.com", 5), &catalog).unwrap();
        assert!(!review.is_approved);

        let stored = catalog.get_active_product(product.id).unwrap();
        assert_eq!(stored.rating, Decimal::ZERO);
        assert_eq!(stored.review_count, 0);
    }

    #[test]
    fn approved_review_moves_the_aggregate() {
        let catalog = MemoryCatalog::new();
        let product = catalog.insert(new_product("Headphones", 4999, Some(5)));

        let review = NewReview {
            product_id: product.id,
            name: "Grace".to_owned(),
            email: Email::parse("g@example.com").unwrap(),
            rating: 4,
            title: String::new(),
            comment: "Fine.".to_owned(),
            is_approved: false,
        };
        let stored = record_approved_review(review, &catalog).unwrap();
        assert!(stored.is_approved);

        let product = catalog.get_active_product(product.id).unwrap();
        assert_eq!(product.rating, Decimal::from(4));
        assert_eq!(product.review_count, 1);
    }

    #[test]
    fn blank_comment_is_rejected() {
        let catalog = MemoryCatalog::new();
        let product = catalog.insert(new_product("Headphones", 4999, Some(5)));
        let mut form = submission(product.id, "g@example.com", 3);
        form.comment = "  ".to_owned();
        let err = submit_review(form, &catalog).unwrap_err();
        assert!(matches!(err, ReviewError::MissingField("comment")));
    }

    #[test]
    fn second_review_from_same_email_is_rejected() {
        let catalog = MemoryCatalog::new();
        let product = catalog.insert(new_product("Headphones", 4999, Some(5)));
        submit_review(submission(product.id, "g@example.com", 5), &catalog).unwrap();
        let err =
            submit_review(submission(product.id, "G@example.com", 2), &catalog).unwrap_err();
        assert!(matches!(
            err,
            ReviewError::Catalog(CatalogError::DuplicateReview(_))
        ));
    }
}
