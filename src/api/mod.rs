//! REST API layer: route handlers, DTOs, router composition, and the
//! OpenAPI document.
//!
//! Notification endpoints are mounted under `/api/v1`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "campus-notifier", description = "Push notification fan-out for campus events"),
    paths(
        handlers::notify::notify,
        handlers::notify::notify_async,
        handlers::reminder::run_sweep,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::NotifyRequest,
        dto::NotifyResponse,
        dto::NotifyAccepted,
        dto::SweepResponse,
        handlers::system::HealthResponse,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "Notifications", description = "Join, update, and cancel notifications"),
        (name = "Reminders", description = "Start-time reminder sweep"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
