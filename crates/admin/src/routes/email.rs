//! Transactional email handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Input for sending an email. The admin UI composes the HTML body.
#[derive(Debug, Deserialize)]
pub struct SendEmailInput {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Send an HTML email via SMTP.
#[instrument(skip(state, input), fields(to = %input.to))]
pub async fn send(
    State(state): State<AppState>,
    Json(input): Json<SendEmailInput>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .email()
        .send_html(&input.to, &input.subject, &input.body)
        .await?;
    Ok(Json(json!({ "message": "Email sent successfully" })))
}
