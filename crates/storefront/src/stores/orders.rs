//! Order store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use clickfit_core::{OrderId, OrderStatus};

use crate::models::order::{NewOrder, Order};

/// Errors surfaced by order store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderStoreError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// Status change not allowed by the lifecycle graph.
    #[error("order {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Persistence contract for orders.
///
/// Orders are append-and-update only; nothing ever deletes one. Every
/// persist recomputes `final_total` from its parts so the field can never
/// drift from the identity.
pub trait OrderStore: Send + Sync {
    /// Persist a new order with `status = Pending`, assigning its ID.
    fn insert(&self, new: NewOrder) -> Order;

    /// Fetch an order by ID.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::NotFound`] for unknown IDs.
    fn get(&self, id: OrderId) -> Result<Order, OrderStoreError>;

    /// Advance the order's status along the lifecycle graph.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::InvalidTransition`] for moves the graph
    /// forbids, or [`OrderStoreError::NotFound`] for unknown IDs.
    fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderStoreError>;

    /// Attach a carrier tracking number.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::NotFound`] for unknown IDs.
    fn set_tracking(&self, id: OrderId, tracking: String) -> Result<Order, OrderStoreError>;
}

#[derive(Default)]
struct OrdersInner {
    orders: HashMap<OrderId, Order>,
    next_id: i32,
}

/// In-memory order store.
#[derive(Default)]
pub struct MemoryOrderStore {
    inner: RwLock<OrdersInner>,
}

impl MemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, OrdersInner> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl OrderStore for MemoryOrderStore {
    fn insert(&self, new: NewOrder) -> Order {
        let mut inner = self.write();
        inner.next_id += 1;
        let id = OrderId::new(inner.next_id);
        let now = Utc::now();
        let mut order = Order {
            id,
            customer_name: new.customer_name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            payment_method: new.payment_method,
            status: OrderStatus::Pending,
            line_items: serde_json::to_string(&new.line_items).unwrap_or_else(|_| "[]".to_owned()),
            total: new.total,
            shipping_cost: new.shipping_cost,
            tax_amount: new.tax_amount,
            discount_amount: new.discount_amount,
            final_total: Decimal::ZERO,
            tracking_number: None,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        order.final_total = order.computed_final_total();
        inner.orders.insert(id, order.clone());
        order
    }

    fn get(&self, id: OrderId) -> Result<Order, OrderStoreError> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .orders
            .get(&id)
            .cloned()
            .ok_or(OrderStoreError::NotFound(id))
    }

    fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderStoreError> {
        let mut inner = self.write();
        let order = inner
            .orders
            .get_mut(&id)
            .ok_or(OrderStoreError::NotFound(id))?;

        if !order.status.can_transition_to(status) {
            return Err(OrderStoreError::InvalidTransition {
                id,
                from: order.status,
                to: status,
            });
        }

        order.status = status;
        order.final_total = order.computed_final_total();
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    fn set_tracking(&self, id: OrderId, tracking: String) -> Result<Order, OrderStoreError> {
        let mut inner = self.write();
        let order = inner
            .orders
            .get_mut(&id)
            .ok_or(OrderStoreError::NotFound(id))?;
        order.tracking_number = Some(tracking);
        order.final_total = order.computed_final_total();
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clickfit_core::{Email, PaymentMethod};

    use super::*;

    fn new_order(total_cents: i64) -> NewOrder {
        NewOrder {
            customer_name: "Ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "555-0100".to_owned(),
            address: "1 Main St".to_owned(),
            payment_method: PaymentMethod::CreditCard,
            line_items: Vec::new(),
            total: Decimal::new(total_cents, 2),
            shipping_cost: Decimal::new(500, 2),
            tax_amount: Decimal::new(800, 2),
            discount_amount: Decimal::new(1000, 2),
            notes: None,
        }
    }

    #[test]
    fn insert_assigns_id_and_recomputes_final_total() {
        let store = MemoryOrderStore::new();
        let order = store.insert(new_order(10000));
        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.status, OrderStatus::Pending);
        // 100.00 + 5.00 + 8.00 - 10.00
        assert_eq!(order.final_total, Decimal::new(10300, 2));

        let second = store.insert(new_order(2000));
        assert_eq!(second.id, OrderId::new(2));
    }

    #[test]
    fn status_moves_follow_the_graph() {
        let store = MemoryOrderStore::new();
        let order = store.insert(new_order(10000));

        let confirmed = store
            .update_status(order.id, OrderStatus::Confirmed)
            .unwrap();
        assert_eq!(confirmed.status, OrderStatus::Confirmed);

        let err = store
            .update_status(order.id, OrderStatus::Delivered)
            .unwrap_err();
        assert_eq!(
            err,
            OrderStoreError::InvalidTransition {
                id: order.id,
                from: OrderStatus::Confirmed,
                to: OrderStatus::Delivered,
            }
        );
    }

    #[test]
    fn tracking_number_attaches() {
        let store = MemoryOrderStore::new();
        let order = store.insert(new_order(10000));
        let updated = store.set_tracking(order.id, "ZX123".to_owned()).unwrap();
        assert_eq!(updated.tracking_number.as_deref(), Some("ZX123"));
    }

    #[test]
    fn final_total_never_drifts() {
        let store = MemoryOrderStore::new();
        let order = store.insert(new_order(10000));
        let updated = store
            .update_status(order.id, OrderStatus::Confirmed)
            .unwrap();
        assert_eq!(updated.final_total, updated.computed_final_total());
    }
}
