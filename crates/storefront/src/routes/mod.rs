//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (?category=)
//! GET  /products/featured      - Featured products (homepage strip)
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Validated cart with notices
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Bulk quantity update
//! POST /cart/remove            - Remove item
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout
//! POST /checkout               - Commit the cart as an order
//!
//! # Newsletter & Contact
//! POST /subscribe              - Newsletter signup
//! POST /unsubscribe            - Newsletter opt-out
//! POST /contact                - Contact form
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod newsletter;
pub mod products;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(checkout::submit))
        // Newsletter
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
        // Contact form
        .route("/contact", post(contact::submit))
}
