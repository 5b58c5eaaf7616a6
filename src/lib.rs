//! # campus-notifier
//!
//! Push notification fan-out for a campus event-discovery app.
//!
//! Two handlers sit on top of an external data store (events, memberships,
//! profiles) and an external push gateway:
//!
//! - the **action notifier** tells the host when someone joins, and tells
//!   members when the host updates or cancels an event;
//! - the **reminder sweep** runs on a schedule and reminds members shortly
//!   before an event starts, exactly once per event.
//!
//! Delivery is best-effort throughout: push failures are logged, never
//! retried, and never reported as a failure of the action that caused them.
//!
//! ## Architecture
//!
//! ```text
//! App / cron (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ActionNotifier, ReminderSweep, NotifyQueue (service/)
//!     ├── Recipients, content, reminder window (domain/)
//!     │
//!     ├── DataStore ── PostgreSQL (store/)
//!     └── PushGateway ── Expo push API (push/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod push;
pub mod service;
pub mod store;
