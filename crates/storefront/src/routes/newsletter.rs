//! Newsletter subscription route handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::services::newsletter;
use crate::state::AppState;

/// Newsletter subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeBody {
    pub email: String,
    pub name: Option<String>,
    pub source: Option<String>,
}

/// Unsubscribe request body.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeBody {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub email: String,
}

/// Subscribe to the newsletter.
///
/// Idempotent: an address already on the list is treated as success.
#[instrument(skip(state, body))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeBody>,
) -> Result<Json<SubscribeResponse>> {
    let subscriber = newsletter::subscribe(
        &body.email,
        body.name,
        body.source,
        state.subscribers(),
        state.notifier(),
    )?;
    Ok(Json(SubscribeResponse {
        success: true,
        email: subscriber.email.to_string(),
    }))
}

/// Unsubscribe from the newsletter.
#[instrument(skip(state, body))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(body): Json<UnsubscribeBody>,
) -> Result<Json<SubscribeResponse>> {
    let subscriber = newsletter::unsubscribe(&body.email, state.subscribers())?;
    Ok(Json(SubscribeResponse {
        success: true,
        email: subscriber.email.to_string(),
    }))
}
