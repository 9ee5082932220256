//! Catalog store: products, stock, and review aggregation.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use clickfit_core::{ProductId, ReviewId};

use crate::models::product::{Category, NewProduct, Product};
use crate::models::review::{NewReview, ProductReview};

/// Errors surfaced by catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The product does not exist or is inactive.
    #[error("product {0} is not available")]
    NotFound(ProductId),

    /// A stock decrement would take finite stock below zero.
    #[error("only {available} items available for product {product_id}")]
    InsufficientStock {
        product_id: ProductId,
        available: u32,
    },

    /// A second review from the same email for the same product.
    #[error("product {0} already has a review from this email")]
    DuplicateReview(ProductId),

    /// Review rating outside 1..=5.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}

/// The catalog contract consumed by the cart reconciler and order commit.
///
/// `decrement_stock` is a conditional decrement: it must atomically check
/// and subtract, failing without effect if the subtraction would go
/// negative. Two concurrent checkouts racing for the last unit must see
/// exactly one success.
pub trait CatalogStore: Send + Sync {
    /// Fetch a product visible to carts: existing and active.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for missing or inactive products.
    fn get_active_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Atomically subtract `amount` units of finite stock.
    ///
    /// Unlimited-stock products are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InsufficientStock`] (with the currently
    /// available quantity) if the decrement would go negative, or
    /// [`CatalogError::NotFound`] for missing/inactive products. Neither
    /// failure changes any stock.
    fn decrement_stock(&self, id: ProductId, amount: u32) -> Result<(), CatalogError>;

    /// Return `amount` units to stock. Inverse of a successful decrement,
    /// used to roll back a partially applied commit.
    fn restock(&self, id: ProductId, amount: u32);

    /// Insert a product, assigning its ID and generating a SKU if none was
    /// supplied.
    fn insert(&self, new: NewProduct) -> Product;

    /// List active products, newest first, optionally filtered by category.
    fn list_active(&self, category: Option<Category>) -> Vec<Product>;

    /// The four newest active products (homepage strip).
    fn featured(&self) -> Vec<Product>;

    /// Record a review. When the review is approved, the product's
    /// aggregate `rating` (mean of approved ratings, one decimal place) and
    /// `review_count` are recomputed. Disapproved reviews are stored
    /// without recomputation, so a previously computed rating can go stale;
    /// that matches the established inbox workflow and is not corrected
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidRating`] for ratings outside 1..=5,
    /// [`CatalogError::DuplicateReview`] for a second review from the same
    /// email, or [`CatalogError::NotFound`] if the product is missing.
    fn add_review(&self, review: NewReview) -> Result<ProductReview, CatalogError>;
}

#[derive(Default)]
struct CatalogInner {
    products: HashMap<ProductId, Product>,
    reviews: Vec<ProductReview>,
    next_product_id: i32,
    next_review_id: i32,
}

/// In-memory catalog.
///
/// All mutation happens under one write lock, which is what makes the
/// conditional stock decrement atomic with respect to concurrent checkouts.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<CatalogInner>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generated SKU: category prefix plus assigned id, e.g. `ELE-4`.
    fn generate_sku(category: Category, id: ProductId) -> String {
        format!("{}-{}", category.sku_prefix(), id)
    }

    /// Deactivate a product, hiding it from carts and listings.
    pub fn deactivate(&self, id: ProductId) {
        let mut inner = self.write();
        if let Some(product) = inner.products.get_mut(&id) {
            product.is_active = false;
            product.updated_at = Utc::now();
        }
    }

    /// Overwrite a product's finite stock level.
    pub fn set_stock(&self, id: ProductId, stock: Option<u32>) {
        let mut inner = self.write();
        if let Some(product) = inner.products.get_mut(&id) {
            product.stock = stock;
            product.updated_at = Utc::now();
        }
    }

    /// Current stock level, for inspection.
    #[must_use]
    pub fn stock_of(&self, id: ProductId) -> Option<Option<u32>> {
        self.read().products.get(&id).map(|p| p.stock)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogInner> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogInner> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CatalogStore for MemoryCatalog {
    fn get_active_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.read()
            .products
            .get(&id)
            .filter(|p| p.is_active)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    fn decrement_stock(&self, id: ProductId, amount: u32) -> Result<(), CatalogError> {
        let mut inner = self.write();
        let product = inner
            .products
            .get_mut(&id)
            .filter(|p| p.is_active)
            .ok_or(CatalogError::NotFound(id))?;

        if let Some(stock) = product.stock {
            let remaining = stock.checked_sub(amount).ok_or(
                CatalogError::InsufficientStock {
                    product_id: id,
                    available: stock,
                },
            )?;
            product.stock = Some(remaining);
            product.updated_at = Utc::now();
        }
        Ok(())
    }

    fn restock(&self, id: ProductId, amount: u32) {
        let mut inner = self.write();
        if let Some(product) = inner.products.get_mut(&id)
            && let Some(stock) = product.stock
        {
            product.stock = Some(stock + amount);
            product.updated_at = Utc::now();
        }
    }

    fn insert(&self, new: NewProduct) -> Product {
        let mut inner = self.write();
        inner.next_product_id += 1;
        let id = ProductId::new(inner.next_product_id);
        let now = Utc::now();
        let product = Product {
            id,
            sku: new
                .sku
                .unwrap_or_else(|| Self::generate_sku(new.category, id)),
            name: new.name,
            description: new.description,
            category: new.category,
            price: new.price,
            image_url: new.image_url,
            stock: new.stock,
            is_active: new.is_active,
            rating: Decimal::ZERO,
            review_count: 0,
            created_at: now,
            updated_at: now,
        };
        inner.products.insert(id, product.clone());
        product
    }

    fn list_active(&self, category: Option<Category>) -> Vec<Product> {
        let inner = self.read();
        let mut products: Vec<Product> = inner
            .products
            .values()
            .filter(|p| p.is_active && category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();
        // Newest first; ids are assigned monotonically.
        products.sort_by(|a, b| b.id.cmp(&a.id));
        products
    }

    fn featured(&self) -> Vec<Product> {
        let mut products = self.list_active(None);
        products.truncate(4);
        products
    }

    fn add_review(&self, review: NewReview) -> Result<ProductReview, CatalogError> {
        if !(1..=5).contains(&review.rating) {
            return Err(CatalogError::InvalidRating(review.rating));
        }

        let mut inner = self.write();
        if !inner.products.contains_key(&review.product_id) {
            return Err(CatalogError::NotFound(review.product_id));
        }
        if inner
            .reviews
            .iter()
            .any(|r| r.product_id == review.product_id && r.email == review.email)
        {
            return Err(CatalogError::DuplicateReview(review.product_id));
        }

        inner.next_review_id += 1;
        let stored = ProductReview {
            id: ReviewId::new(inner.next_review_id),
            product_id: review.product_id,
            name: review.name,
            email: review.email,
            rating: review.rating,
            title: review.title,
            comment: review.comment,
            is_approved: review.is_approved,
            created_at: Utc::now(),
        };
        inner.reviews.push(stored.clone());

        if stored.is_approved {
            let approved: Vec<u8> = inner
                .reviews
                .iter()
                .filter(|r| r.product_id == stored.product_id && r.is_approved)
                .map(|r| r.rating)
                .collect();
            let count = u32::try_from(approved.len()).unwrap_or(u32::MAX);
            let mean = (approved.iter().map(|&r| Decimal::from(r)).sum::<Decimal>()
                / Decimal::from(count))
            .round_dp(1);
            if let Some(product) = inner.products.get_mut(&stored.product_id) {
                product.rating = mean;
                product.review_count = count;
                product.updated_at = Utc::now();
            }
        }

        Ok(stored)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use clickfit_core::{Email, Price};

    use super::*;

    pub(crate) fn new_product(name: &str, cents: i64, stock: Option<u32>) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            description: String::new(),
            category: Category::Electronics,
            price: Price::new(Decimal::new(cents, 2)).unwrap(),
            image_url: String::new(),
            stock,
            is_active: true,
            sku: None,
        }
    }

    fn review(product_id: ProductId, email: &str, rating: u8, approved: bool) -> NewReview {
        NewReview {
            product_id,
            name: "Reviewer".to_owned(),
            email: Email::parse(email).unwrap(),
            rating,
            title: String::new(),
            comment: String::new(),
            is_approved: approved,
        }
    }

    #[test]
    fn insert_generates_sku_from_category_and_id() {
        let catalog = MemoryCatalog::new();
        let p1 = catalog.insert(new_product("Headphones", 4999, Some(5)));
        let p2 = catalog.insert(new_product("Speaker", 8999, None));
        assert_eq!(p1.sku, "ELE-1");
        assert_eq!(p2.sku, "ELE-2");

        let mut custom = new_product("Amp", 19999, None);
        custom.sku = Some("AMP-X".to_owned());
        assert_eq!(catalog.insert(custom).sku, "AMP-X");
    }

    #[test]
    fn inactive_products_are_invisible() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Headphones", 4999, Some(5)));
        assert!(catalog.get_active_product(p.id).is_ok());

        catalog.deactivate(p.id);
        assert_eq!(
            catalog.get_active_product(p.id),
            Err(CatalogError::NotFound(p.id))
        );
        assert!(catalog.list_active(None).is_empty());
    }

    #[test]
    fn decrement_guards_against_negative_stock() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Headphones", 4999, Some(3)));

        catalog.decrement_stock(p.id, 2).unwrap();
        assert_eq!(catalog.stock_of(p.id), Some(Some(1)));

        assert_eq!(
            catalog.decrement_stock(p.id, 2),
            Err(CatalogError::InsufficientStock {
                product_id: p.id,
                available: 1
            })
        );
        // Failed decrement changed nothing.
        assert_eq!(catalog.stock_of(p.id), Some(Some(1)));
    }

    #[test]
    fn unlimited_stock_is_never_decremented() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Download", 999, None));
        catalog.decrement_stock(p.id, 1000).unwrap();
        assert_eq!(catalog.stock_of(p.id), Some(None));
    }

    #[test]
    fn restock_undoes_a_decrement() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Headphones", 4999, Some(3)));
        catalog.decrement_stock(p.id, 3).unwrap();
        catalog.restock(p.id, 3);
        assert_eq!(catalog.stock_of(p.id), Some(Some(3)));
    }

    #[test]
    fn approved_reviews_update_rating_mean() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Headphones", 4999, Some(5)));

        catalog.add_review(review(p.id, "a@example.com", 5, true)).unwrap();
        catalog.add_review(review(p.id, "b@example.com", 4, true)).unwrap();

        let stored = catalog.get_active_product(p.id).unwrap();
        assert_eq!(stored.rating, Decimal::new(45, 1)); // (5+4)/2 = 4.5
        assert_eq!(stored.review_count, 2);
    }

    #[test]
    fn unapproved_reviews_do_not_touch_rating() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Headphones", 4999, Some(5)));

        catalog.add_review(review(p.id, "a@example.com", 1, false)).unwrap();
        let stored = catalog.get_active_product(p.id).unwrap();
        assert_eq!(stored.rating, Decimal::ZERO);
        assert_eq!(stored.review_count, 0);
    }

    #[test]
    fn duplicate_review_per_email_rejected() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Headphones", 4999, Some(5)));

        catalog.add_review(review(p.id, "a@example.com", 5, true)).unwrap();
        assert_eq!(
            catalog.add_review(review(p.id, "a@example.com", 3, true)),
            Err(CatalogError::DuplicateReview(p.id))
        );
    }

    #[test]
    fn rating_bounds_enforced() {
        let catalog = MemoryCatalog::new();
        let p = catalog.insert(new_product("Headphones", 4999, Some(5)));
        assert_eq!(
            catalog.add_review(review(p.id, "a@example.com", 0, true)),
            Err(CatalogError::InvalidRating(0))
        );
        assert_eq!(
            catalog.add_review(review(p.id, "a@example.com", 6, true)),
            Err(CatalogError::InvalidRating(6))
        );
    }
}
