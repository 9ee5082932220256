//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `reconcile` - Cart validation against live catalog state
//! - `cart` - Cart mutations (view, add, update, remove) over the session store
//! - `checkout` - Atomic cart-to-order commit with inventory decrement
//! - `reviews` - Review recording and rating aggregation
//! - `newsletter` - Subscription handling
//! - `contact` - Contact-message intake
//! - `notify` - Best-effort notification dispatch

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod newsletter;
pub mod notify;
pub mod reconcile;
pub mod reviews;
