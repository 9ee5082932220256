//! Contact inbox domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clickfit_core::{ContactId, Email};

/// Subject categories for contact messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactSubject {
    #[default]
    General,
    Product,
    Order,
    Return,
    Other,
}

/// A message received through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ContactId,
    pub name: String,
    pub email: Email,
    pub subject: ContactSubject,
    pub message: String,
    pub phone: Option<String>,
    /// Order ID mentioned by the customer, if the message concerns one.
    pub order_reference: Option<String>,
    pub is_resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for storing a contact message.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: ContactSubject,
    pub message: String,
    pub phone: Option<String>,
    pub order_reference: Option<String>,
}
