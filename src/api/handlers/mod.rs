//! REST endpoint handlers organized by resource.

pub mod notify;
pub mod reminder;
pub mod system;

use axum::Router;

use crate::app_state::AppState;
use crate::error::NotifierError;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(notify::routes())
        .merge(reminder::routes())
}

/// Fallback for unsupported methods on a known path.
pub async fn method_not_allowed() -> NotifierError {
    NotifierError::MethodNotAllowed
}
