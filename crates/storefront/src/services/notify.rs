//! Best-effort notification dispatch.
//!
//! Notifications are advisory: an order that commits but fails to notify
//! is still a committed order. Senders therefore never bubble errors into
//! the surrounding operation; failures are logged and life goes on.

use std::sync::Mutex;

use thiserror::Error;

use crate::models::contact::ContactMessage;
use crate::models::order::Order;
use crate::models::subscriber::Subscriber;

/// An event worth telling someone about.
#[derive(Debug, Clone)]
pub enum Notification {
    /// Admin-facing: a new order came in.
    OrderPlaced(Order),
    /// Customer-facing: confirmation of their own order.
    OrderConfirmation(Order),
    /// Admin-facing: a contact message arrived.
    ContactReceived(ContactMessage),
    /// Admin-facing: a new newsletter subscriber.
    SubscriberJoined(Subscriber),
}

impl Notification {
    /// Short human-readable summary, used as the log line.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::OrderPlaced(order) => format!(
                "new order #{} from {} <{}>, {} items, total ${:.2}",
                order.id,
                order.customer_name,
                order.email,
                order.item_count(),
                order.final_total
            ),
            Self::OrderConfirmation(order) => format!(
                "order confirmation #{} to <{}>, total ${:.2}",
                order.id, order.email, order.final_total
            ),
            Self::ContactReceived(message) => format!(
                "contact message from {} <{}>",
                message.name, message.email
            ),
            Self::SubscriberJoined(subscriber) => {
                format!("new newsletter subscriber <{}>", subscriber.email)
            }
        }
    }
}

/// A notification send that did not go through. Never fatal.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification channel failed: {0}")]
    Channel(String),
}

/// Outbound notification channel.
///
/// Implementations may block on I/O; callers must treat the whole call as
/// best-effort and route failures through [`send_best_effort`].
pub trait Notifier: Send + Sync {
    /// Attempt delivery.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the channel fails; the caller logs and
    /// continues.
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Deliver a notification, logging failure instead of propagating it.
pub fn send_best_effort(notifier: &dyn Notifier, notification: &Notification) {
    if let Err(error) = notifier.notify(notification) {
        tracing::error!(%error, summary = %notification.summary(), "notification failed");
    }
}

/// Notifier that writes structured log lines.
///
/// Stands in for outbound email: the admin inbox and customer confirmations
/// are someone else's delivery problem, this service just has to hand the
/// event over.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(summary = %notification.summary(), "notification");
        Ok(())
    }
}

/// Notifier that records everything it is asked to send. Test double.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    /// When set, every send fails; for exercising best-effort paths.
    pub fail: bool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notification.clone());
        if self.fail {
            return Err(NotifyError::Channel("recording notifier set to fail".to_owned()));
        }
        Ok(())
    }
}
