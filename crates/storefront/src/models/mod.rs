//! Domain models for the storefront.
//!
//! These types represent validated domain objects, separate from wire and
//! store representations.

pub mod cart;
pub mod contact;
pub mod order;
pub mod product;
pub mod review;
pub mod session;
pub mod subscriber;

pub use cart::{CartKey, CartLine};
pub use contact::{ContactMessage, ContactSubject, NewContactMessage};
pub use order::{NewOrder, Order};
pub use product::{Category, NewProduct, Product};
pub use review::{NewReview, ProductReview};
pub use subscriber::Subscriber;
