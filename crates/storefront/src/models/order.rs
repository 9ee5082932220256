//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clickfit_core::{Email, OrderId, OrderStatus, PaymentMethod};

use super::cart::CartLine;

/// A persisted customer order.
///
/// `line_items` is a frozen snapshot of the reconciled cart at commit time,
/// stored as its own JSON-encoded string. It must never reflect later
/// product price or name changes. Orders are never deleted (audit trail);
/// fulfillment staff advance `status` and set `tracking_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// JSON-encoded array of the cart lines as they were at commit time.
    pub line_items: String,
    /// Sum of line subtotals at commit time.
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub shipping_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_amount: Decimal,
    /// Always `total + shipping_cost + tax_amount - discount_amount`,
    /// recomputed by the store on every persist.
    #[serde(with = "rust_decimal::serde::str")]
    pub final_total: Decimal,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Decode the frozen line-item snapshot.
    ///
    /// Returns an empty list if the stored JSON is unreadable, mirroring a
    /// lenient read of historical records.
    #[must_use]
    pub fn items(&self) -> Vec<CartLine> {
        serde_json::from_str(&self.line_items).unwrap_or_default()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items().iter().map(|line| line.quantity).sum()
    }

    /// The `final_total` identity, used by the store on every persist.
    #[must_use]
    pub fn computed_final_total(&self) -> Decimal {
        self.total + self.shipping_cost + self.tax_amount - self.discount_amount
    }
}

/// Input for persisting a new order at checkout commit.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    /// Frozen snapshot of the reconciled cart.
    pub line_items: Vec<CartLine>,
    pub total: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub notes: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clickfit_core::{Price, ProductId};

    use super::*;

    #[test]
    fn snapshot_decodes_and_counts() {
        let lines = vec![
            CartLine {
                id: ProductId::new(1),
                name: "Jacket".to_owned(),
                price: Price::new(Decimal::new(4999, 2)).unwrap(),
                image: String::new(),
                quantity: 2,
            },
            CartLine {
                id: ProductId::new(2),
                name: "Belt".to_owned(),
                price: Price::new(Decimal::new(1500, 2)).unwrap(),
                image: String::new(),
                quantity: 1,
            },
        ];
        let order = Order {
            id: OrderId::new(1),
            customer_name: "Ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "555-0100".to_owned(),
            address: "1 Main St".to_owned(),
            payment_method: PaymentMethod::Paypal,
            status: OrderStatus::Pending,
            line_items: serde_json::to_string(&lines).unwrap(),
            total: Decimal::new(11498, 2),
            shipping_cost: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            final_total: Decimal::new(11498, 2),
            tracking_number: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(order.items(), lines);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn unreadable_snapshot_reads_as_empty() {
        let order = Order {
            id: OrderId::new(2),
            customer_name: String::new(),
            email: Email::parse("x@example.com").unwrap(),
            phone: String::new(),
            address: String::new(),
            payment_method: PaymentMethod::CreditCard,
            status: OrderStatus::Pending,
            line_items: "not json".to_owned(),
            total: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            final_total: Decimal::ZERO,
            tracking_number: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(order.items().is_empty());
        assert_eq!(order.item_count(), 0);
    }

    #[test]
    fn final_total_identity() {
        let order = Order {
            id: OrderId::new(3),
            customer_name: String::new(),
            email: Email::parse("x@example.com").unwrap(),
            phone: String::new(),
            address: String::new(),
            payment_method: PaymentMethod::CreditCard,
            status: OrderStatus::Pending,
            line_items: "[]".to_owned(),
            total: Decimal::new(10000, 2),
            shipping_cost: Decimal::new(500, 2),
            tax_amount: Decimal::new(800, 2),
            discount_amount: Decimal::new(1000, 2),
            final_total: Decimal::ZERO,
            tracking_number: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(order.computed_final_total(), Decimal::new(10300, 2));
    }
}
