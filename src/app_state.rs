//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{ActionNotifier, NotifyQueue, ReminderSweep};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Every client (data store, push gateway) is constructed once at startup
/// and reaches the handlers only through this value.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Join/update/cancel notifications.
    pub action_notifier: Arc<ActionNotifier>,
    /// Start-time reminder sweep.
    pub reminder_sweep: Arc<ReminderSweep>,
    /// Fire-and-forget hand-off to the action notifier.
    pub notify_queue: NotifyQueue,
}
