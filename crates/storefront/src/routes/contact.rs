//! Contact form route handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clickfit_core::ContactId;

use crate::error::Result;
use crate::models::contact::ContactSubject;
use crate::services::contact::{self, ContactForm};
use crate::state::AppState;

/// Contact form request body.
#[derive(Debug, Deserialize)]
pub struct ContactBody {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: ContactSubject,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub order_reference: Option<String>,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub id: ContactId,
}

/// Submit a contact message.
#[instrument(skip(state, body))]
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<ContactBody>,
) -> Result<Json<ContactResponse>> {
    let stored = contact::submit_contact(
        ContactForm {
            name: body.name,
            email: body.email,
            subject: body.subject,
            message: body.message,
            phone: body.phone,
            order_reference: body.order_reference,
        },
        state.contacts(),
        state.notifier(),
    )?;
    Ok(Json(ContactResponse {
        success: true,
        id: stored.id,
    }))
}
