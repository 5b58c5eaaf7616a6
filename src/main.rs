//! campus-notifier server entry point.
//!
//! Starts the Axum HTTP server with the notification and reminder
//! endpoints, and optionally the in-process reminder schedule.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use campus_notifier::api;
use campus_notifier::app_state::AppState;
use campus_notifier::config::{LogFormat, NotifierConfig};
use campus_notifier::push::{ExpoPushGateway, PushGateway};
use campus_notifier::service::{ActionNotifier, NotifyQueue, ReminderSweep};
use campus_notifier::store::{DataStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = NotifierConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting campus-notifier");

    // External clients
    let store: Arc<dyn DataStore> = Arc::new(
        PostgresStore::connect(
            &config.database_url,
            config.database_max_connections,
            config.database_min_connections,
            Duration::from_secs(config.database_connect_timeout_secs),
        )
        .await
        .context("connecting to the data store")?,
    );
    let gateway: Arc<dyn PushGateway> = Arc::new(
        ExpoPushGateway::new(
            config.push_gateway_url.clone(),
            Duration::from_secs(config.push_timeout_secs),
            config.push_access_token.clone(),
        )
        .context("building the push gateway client")?,
    );

    // Build service layer
    let action_notifier = Arc::new(ActionNotifier::new(
        Arc::clone(&store),
        Arc::clone(&gateway),
    ));
    let reminder_sweep = Arc::new(ReminderSweep::new(store, gateway, config.reminder_window));
    let (notify_queue, _queue_worker) =
        NotifyQueue::start(Arc::clone(&action_notifier), config.notify_queue_capacity);

    if let Some(every) = config.reminder_sweep_interval() {
        if config.sweep_interval_exceeds_window() {
            tracing::warn!(
                interval_secs = every.as_secs(),
                window_secs = config.reminder_window.width().num_seconds(),
                "sweep interval is wider than the reminder window; some events may be missed"
            );
        }
        let _schedule = Arc::clone(&reminder_sweep).spawn_periodic(every);
        tracing::info!(interval_secs = every.as_secs(), "in-process reminder schedule enabled");
    }

    // Build application state
    let app_state = AppState {
        action_notifier,
        reminder_sweep,
        notify_queue,
    };

    // Build router
    let app = api::build_router()
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
