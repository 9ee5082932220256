//! Session-related types.
//!
//! The session holds only small pieces of navigation state; the cart lines
//! themselves live behind the cart store, keyed by the session's cart key.

/// Session keys for storefront state.
pub mod keys {
    /// Key for the opaque cart key mapping this session to its cart.
    pub const CART_KEY: &str = "cart_key";

    /// Key for the id of the most recently placed order (success page).
    pub const LAST_ORDER_ID: &str = "last_order_id";
}
