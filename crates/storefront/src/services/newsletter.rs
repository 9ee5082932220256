//! Newsletter signup.

use thiserror::Error;
use tracing::instrument;

use clickfit_core::{Email, EmailError};

use crate::models::subscriber::Subscriber;
use crate::services::notify::{send_best_effort, Notification, Notifier};
use crate::stores::inbox::MemorySubscriberStore;

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("no subscription found for this address")]
    NotSubscribed,
}

/// Sign an address up, idempotently.
///
/// An address already on the list gets its existing record back and no
/// second notification. A fresh signup sends [`Notification::SubscriberJoined`].
///
/// # Errors
///
/// Only [`NewsletterError::InvalidEmail`].
#[instrument(skip_all)]
pub fn subscribe(
    email: &str,
    name: Option<String>,
    source: Option<String>,
    subscribers: &MemorySubscriberStore,
    notifier: &dyn Notifier,
) -> Result<Subscriber, NewsletterError> {
    let email = Email::parse_normalized(email)?;
    let outcome = subscribers.subscribe(email, name, source);
    if outcome.created {
        send_best_effort(
            notifier,
            &Notification::SubscriberJoined(outcome.subscriber.clone()),
        );
        tracing::info!(subscriber_id = %outcome.subscriber.id, "new subscriber");
    }
    Ok(outcome.subscriber)
}

/// Deactivate the subscription for `email`.
///
/// # Errors
///
/// [`NewsletterError::InvalidEmail`] on an unparseable address,
/// [`NewsletterError::NotSubscribed`] when no record exists.
#[instrument(skip_all)]
pub fn unsubscribe(
    email: &str,
    subscribers: &MemorySubscriberStore,
) -> Result<Subscriber, NewsletterError> {
    let email = Email::parse_normalized(email)?;
    subscribers
        .unsubscribe(&email)
        .ok_or(NewsletterError::NotSubscribed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::services::notify::RecordingNotifier;

    use super::*;

    #[test]
    fn signup_is_idempotent_and_notifies_once() {
        let subscribers = MemorySubscriberStore::new();
        let notifier = RecordingNotifier::new();

        let first = subscribe("Dee@Example.com", None, None, &subscribers, &notifier).unwrap();
        let second = subscribe("dee@example.com ", None, None, &subscribers, &notifier).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[test]
    fn bad_address_is_rejected() {
        let subscribers = MemorySubscriberStore::new();
        let err = subscribe("not-an-email", None, None, &subscribers, &RecordingNotifier::new())
            .unwrap_err();
        assert!(matches!(err, NewsletterError::InvalidEmail(_)));
    }

    #[test]
    fn unsubscribe_deactivates_the_record() {
        let subscribers = MemorySubscriberStore::new();
        subscribe("dee@example.com", None, None, &subscribers, &RecordingNotifier::new())
            .unwrap();

        let gone = unsubscribe("dee@example.com", &subscribers).unwrap();
        assert!(!gone.is_active);
        assert!(gone.unsubscribed_at.is_some());

        let err = unsubscribe("nobody@example.com", &subscribers).unwrap_err();
        assert!(matches!(err, NewsletterError::NotSubscribed));
    }
}
