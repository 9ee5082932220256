//! Newsletter subscriber domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clickfit_core::{Email, SubscriberId};

/// A newsletter subscriber.
///
/// Unique per email address. Unsubscribing deactivates the record rather
/// than deleting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: Email,
    pub name: Option<String>,
    pub is_active: bool,
    /// How the subscriber signed up (e.g. "footer form").
    pub source: Option<String>,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}
