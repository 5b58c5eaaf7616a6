//! Reminder sweep trigger.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::method_not_allowed;
use crate::api::dto::SweepResponse;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, NotifierError};

/// `GET|POST /reminders/sweep`: Send start reminders for events entering
/// the reminder window.
///
/// Safe to call ad hoc; events already reminded are excluded.
///
/// # Errors
///
/// Returns [`NotifierError::UpstreamFetch`] if candidate events cannot be
/// listed.
#[utoipa::path(
    post,
    path = "/api/v1/reminders/sweep",
    tag = "Reminders",
    summary = "Run the reminder sweep",
    description = "Finds active, not-yet-reminded events starting 12 to 18 minutes from now, notifies their members, and flags each event as reminded. Also accepts GET for cron callers.",
    responses(
        (status = 200, description = "Sweep finished", body = SweepResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Events could not be listed", body = ErrorResponse),
    )
)]
pub async fn run_sweep(State(state): State<AppState>) -> Result<impl IntoResponse, NotifierError> {
    let report = state.reminder_sweep.run().await?;
    Ok(Json(SweepResponse::from(report)))
}

/// Reminder routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/reminders/sweep",
        get(run_sweep).post(run_sweep).fallback(method_not_allowed),
    )
}
