//! Collaborator stores.
//!
//! The cart reconciler and order commit only ever talk to these contracts,
//! so the in-memory implementations can be swapped for durable ones without
//! touching the domain logic.

pub mod carts;
pub mod catalog;
pub mod inbox;
pub mod orders;

pub use carts::{CartStore, MemoryCartStore};
pub use catalog::{CatalogError, CatalogStore, MemoryCatalog};
pub use inbox::{MemoryContactStore, MemorySubscriberStore, SubscribeOutcome};
pub use orders::{MemoryOrderStore, OrderStore, OrderStoreError};
