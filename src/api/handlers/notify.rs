//! Action notification handlers: synchronous and queued.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::method_not_allowed;
use crate::api::dto::{NotifyAccepted, NotifyRequest, NotifyResponse};
use crate::app_state::AppState;
use crate::domain::NotifyCommand;
use crate::error::{ErrorResponse, NotifierError};

/// `POST /notify`: Notify the parties affected by a join, update, or
/// cancel.
///
/// # Errors
///
/// Returns [`NotifierError`] on an invalid body or a missing event.
/// Dispatch failures are not errors; they show up as `sent: 0`.
#[utoipa::path(
    post,
    path = "/api/v1/notify",
    tag = "Notifications",
    summary = "Notify an event action",
    description = "Resolves recipients for a join (host), update or cancel (all members except the actor) and sends one push batch. Responds with the number of messages the push gateway accepted.",
    request_body = NotifyRequest,
    responses(
        (status = 200, description = "Notifications processed", body = NotifyResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
    )
)]
pub async fn notify(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, NotifierError> {
    let command = parse_command(&body)?;
    let sent = state.action_notifier.notify(&command).await?;
    Ok(Json(NotifyResponse { sent }))
}

/// `POST /notify/async`: Queue a notification and return immediately.
///
/// # Errors
///
/// Returns [`NotifierError`] on an invalid body or when the queue cannot
/// accept more work.
#[utoipa::path(
    post,
    path = "/api/v1/notify/async",
    tag = "Notifications",
    summary = "Queue an event action notification",
    description = "Validates the request and hands it to the background notification queue. The caller does not wait for delivery; a later failure is only logged.",
    request_body = NotifyRequest,
    responses(
        (status = 202, description = "Notification queued", body = NotifyAccepted),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 503, description = "Queue full or stopped", body = ErrorResponse),
    )
)]
pub async fn notify_async(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, NotifierError> {
    let command = parse_command(&body)?;
    state.notify_queue.submit(command)?;
    Ok((StatusCode::ACCEPTED, Json(NotifyAccepted { queued: true })))
}

/// Parses and validates a notify body. Content-Type is not required.
fn parse_command(body: &[u8]) -> Result<NotifyCommand, NotifierError> {
    let request: NotifyRequest = serde_json::from_slice(body)
        .map_err(|e| NotifierError::InvalidRequest(format!("invalid JSON body: {e}")))?;
    request.validate()
}

/// Notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notify", post(notify).fallback(method_not_allowed))
        .route("/notify/async", post(notify_async).fallback(method_not_allowed))
}
