//! Contact-message inbox and newsletter subscriber stores.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use clickfit_core::{ContactId, Email, SubscriberId};

use crate::models::contact::{ContactMessage, NewContactMessage};
use crate::models::subscriber::Subscriber;

/// In-memory contact-message inbox.
#[derive(Default)]
pub struct MemoryContactStore {
    inner: RwLock<ContactInner>,
}

#[derive(Default)]
struct ContactInner {
    messages: HashMap<ContactId, ContactMessage>,
    next_id: i32,
}

impl MemoryContactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an incoming message, unresolved.
    pub fn insert(&self, new: NewContactMessage) -> ContactMessage {
        let mut inner = self.write();
        inner.next_id += 1;
        let id = ContactId::new(inner.next_id);
        let message = ContactMessage {
            id,
            name: new.name,
            email: new.email,
            subject: new.subject,
            message: new.message,
            phone: new.phone,
            order_reference: new.order_reference,
            is_resolved: false,
            resolved_at: None,
            created_at: Utc::now(),
        };
        inner.messages.insert(id, message.clone());
        message
    }

    /// Mark a message resolved, stamping the resolution time.
    pub fn resolve(&self, id: ContactId) -> Option<ContactMessage> {
        let mut inner = self.write();
        let message = inner.messages.get_mut(&id)?;
        message.is_resolved = true;
        message.resolved_at = Some(Utc::now());
        Some(message.clone())
    }

    pub fn get(&self, id: ContactId) -> Option<ContactMessage> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .messages
            .get(&id)
            .cloned()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ContactInner> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Outcome of a subscribe call: the record, and whether it was created by
/// this call (an existing address subscribes idempotently).
#[derive(Debug, Clone)]
pub struct SubscribeOutcome {
    pub subscriber: Subscriber,
    pub created: bool,
}

/// In-memory newsletter subscriber store, unique per email.
#[derive(Default)]
pub struct MemorySubscriberStore {
    inner: RwLock<SubscriberInner>,
}

#[derive(Default)]
struct SubscriberInner {
    subscribers: Vec<Subscriber>,
    next_id: i32,
}

impl MemorySubscriberStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create by email. An address that already subscribed gets its
    /// existing record back untouched.
    pub fn subscribe(
        &self,
        email: Email,
        name: Option<String>,
        source: Option<String>,
    ) -> SubscribeOutcome {
        let mut inner = self.write();
        if let Some(existing) = inner.subscribers.iter().find(|s| s.email == email) {
            return SubscribeOutcome {
                subscriber: existing.clone(),
                created: false,
            };
        }

        inner.next_id += 1;
        let subscriber = Subscriber {
            id: SubscriberId::new(inner.next_id),
            email,
            name,
            is_active: true,
            source,
            subscribed_at: Utc::now(),
            unsubscribed_at: None,
        };
        inner.subscribers.push(subscriber.clone());
        SubscribeOutcome {
            subscriber,
            created: true,
        }
    }

    /// Deactivate the subscription for `email`, stamping the time.
    /// Returns the updated record if one existed.
    pub fn unsubscribe(&self, email: &Email) -> Option<Subscriber> {
        let mut inner = self.write();
        let subscriber = inner.subscribers.iter_mut().find(|s| &s.email == email)?;
        subscriber.is_active = false;
        subscriber.unsubscribed_at = Some(Utc::now());
        Some(subscriber.clone())
    }

    pub fn find(&self, email: &Email) -> Option<Subscriber> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .subscribers
            .iter()
            .find(|s| &s.email == email)
            .cloned()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SubscriberInner> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
