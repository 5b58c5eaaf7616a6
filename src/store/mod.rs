//! Data store layer: read/write access to events, memberships, and
//! profiles.
//!
//! The tables belong to the external backend; this service reads them and
//! writes exactly one column (`events.reminder_sent_at`). [`DataStore`] is
//! the seam the notification services depend on, and
//! [`postgres::PostgresStore`] talks to the backend's PostgreSQL database.

pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Event, EventId, MemberContact, Profile, UserId};
use crate::error::NotifierError;

pub use postgres::PostgresStore;

/// Read/write operations the notifier needs from the data store.
///
/// Implementations return [`NotifierError::UpstreamFetch`] for failed
/// reads and [`NotifierError::UpstreamWrite`] for failed writes.
#[async_trait]
pub trait DataStore: Send + Sync + fmt::Debug {
    /// Loads a single event by id, or `None` if it does not exist.
    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, NotifierError>;

    /// Lists active events starting within `[from, to]` whose reminder has
    /// not been sent.
    async fn list_reminder_candidates(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>, NotifierError>;

    /// Lists every member of an event with their display name and token.
    async fn list_member_contacts(
        &self,
        event_id: EventId,
    ) -> Result<Vec<MemberContact>, NotifierError>;

    /// Loads a single profile by user id, or `None` if it does not exist.
    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, NotifierError>;

    /// Sets `reminder_sent_at` on an event if it is still unset.
    ///
    /// Returns `true` if this call set the flag, `false` if it was already
    /// set (or the event no longer exists). An existing timestamp is never
    /// overwritten.
    async fn mark_reminder_sent(
        &self,
        event_id: EventId,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, NotifierError>;
}
