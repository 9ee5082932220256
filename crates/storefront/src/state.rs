//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::notify::{Notifier, TracingNotifier};
use crate::stores::carts::{CartStore, MemoryCartStore};
use crate::stores::catalog::{CatalogStore, MemoryCatalog};
use crate::stores::inbox::{MemoryContactStore, MemorySubscriberStore};
use crate::stores::orders::{MemoryOrderStore, OrderStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog and session cart stores.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogStore>,
    carts: Arc<dyn CartStore>,
    orders: Arc<dyn OrderStore>,
    contacts: Arc<MemoryContactStore>,
    subscribers: Arc<MemorySubscriberStore>,
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create a new application state backed by in-memory stores and the
    /// log-based notifier.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(MemoryCatalog::new()),
            Arc::new(MemoryCartStore::new()),
            Arc::new(MemoryOrderStore::new()),
            Arc::new(TracingNotifier),
        )
    }

    /// Create an application state with explicit collaborators.
    #[must_use]
    pub fn with_stores(
        config: StorefrontConfig,
        catalog: Arc<dyn CatalogStore>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
                orders,
                contacts: Arc::new(MemoryContactStore::new()),
                subscribers: Arc::new(MemorySubscriberStore::new()),
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the session cart store.
    #[must_use]
    pub fn carts(&self) -> &dyn CartStore {
        self.inner.carts.as_ref()
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderStore {
        self.inner.orders.as_ref()
    }

    /// Get a reference to the contact inbox.
    #[must_use]
    pub fn contacts(&self) -> &MemoryContactStore {
        &self.inner.contacts
    }

    /// Get a reference to the newsletter subscriber list.
    #[must_use]
    pub fn subscribers(&self) -> &MemorySubscriberStore {
        &self.inner.subscribers
    }

    /// Get a reference to the outbound notification channel.
    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.inner.notifier.as_ref()
    }
}
