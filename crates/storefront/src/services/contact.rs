//! Contact form intake.

use thiserror::Error;
use tracing::instrument;

use clickfit_core::{ContactId, Email, EmailError};

use crate::models::contact::{ContactMessage, ContactSubject, NewContactMessage};
use crate::services::notify::{send_best_effort, Notification, Notifier};
use crate::stores::inbox::MemoryContactStore;

/// Visitor-submitted contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
    pub phone: Option<String>,
    pub order_reference: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("contact message {0} not found")]
    NotFound(ContactId),
}

/// Store a contact message and notify the inbox, best-effort.
///
/// # Errors
///
/// Fails on a blank name or message, or an unparseable email.
#[instrument(skip_all)]
pub fn submit_contact(
    form: ContactForm,
    contacts: &MemoryContactStore,
    notifier: &dyn Notifier,
) -> Result<ContactMessage, ContactError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ContactError::MissingField("name"));
    }
    let message = form.message.trim();
    if message.is_empty() {
        return Err(ContactError::MissingField("message"));
    }
    let email = Email::parse_normalized(&form.email)?;

    let stored = contacts.insert(NewContactMessage {
        name: name.to_owned(),
        email,
        subject: form.subject,
        message: message.to_owned(),
        phone: form.phone,
        order_reference: form.order_reference,
    });

    send_best_effort(notifier, &Notification::ContactReceived(stored.clone()));
    tracing::info!(contact_id = %stored.id, "contact message received");
    Ok(stored)
}

/// Mark a message handled.
///
/// # Errors
///
/// [`ContactError::NotFound`] for an unknown id.
pub fn resolve_contact(
    id: ContactId,
    contacts: &MemoryContactStore,
) -> Result<ContactMessage, ContactError> {
    contacts.resolve(id).ok_or(ContactError::NotFound(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::services::notify::RecordingNotifier;

    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Sam".to_owned(),
            email: "sam@example.com".to_owned(),
            subject: ContactSubject::Order,
            message: "Where is my order?".to_owned(),
            phone: None,
            order_reference: Some("1042".to_owned()),
        }
    }

    #[test]
    fn submission_stores_and_notifies() {
        let contacts = MemoryContactStore::new();
        let notifier = RecordingNotifier::new();

        let stored = submit_contact(form(), &contacts, &notifier).unwrap();
        assert!(!stored.is_resolved);
        assert_eq!(notifier.sent().len(), 1);

        let resolved = resolve_contact(stored.id, &contacts).unwrap();
        assert!(resolved.is_resolved);
        assert!(resolved.resolved_at.is_some());
    }

    #[test]
    fn blank_message_is_rejected() {
        let contacts = MemoryContactStore::new();
        let mut bad = form();
        bad.message = " ".to_owned();
        let err = submit_contact(bad, &contacts, &RecordingNotifier::new()).unwrap_err();
        assert!(matches!(err, ContactError::MissingField("message")));
    }

    #[test]
    fn failed_notification_still_stores_the_message() {
        let contacts = MemoryContactStore::new();
        let notifier = RecordingNotifier::failing();
        let stored = submit_contact(form(), &contacts, &notifier).unwrap();
        assert!(contacts.get(stored.id).is_some());
    }
}
