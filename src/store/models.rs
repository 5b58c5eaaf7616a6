//! Database rows for the backend's `events`, `event_members`, and
//! `profiles` tables, and their conversion into domain types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Event, EventId, EventStatus, MemberContact, Profile, PushToken, UserId};
use crate::error::NotifierError;

/// Column list matching [`EventRow`].
pub const EVENT_COLUMNS: &str =
    "id, host_id, title, start_time, end_time, location_text, capacity, status, reminder_sent_at";

/// A row from the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Event id.
    pub id: Uuid,
    /// Hosting user id.
    pub host_id: Uuid,
    /// Title.
    pub title: String,
    /// Start timestamp.
    pub start_time: DateTime<Utc>,
    /// End timestamp.
    pub end_time: DateTime<Utc>,
    /// Location text; nullable in older rows.
    pub location_text: Option<String>,
    /// Capacity, `NULL` for unlimited.
    pub capacity: Option<i32>,
    /// `active` or `canceled`.
    pub status: String,
    /// Reminder idempotency flag.
    pub reminder_sent_at: Option<DateTime<Utc>>,
}

impl TryFrom<EventRow> for Event {
    type Error = NotifierError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let status: EventStatus = row
            .status
            .parse()
            .map_err(|e: String| NotifierError::UpstreamFetch(format!("event {}: {e}", row.id)))?;

        Ok(Self {
            id: EventId::from_uuid(row.id),
            host_id: UserId::from_uuid(row.host_id),
            title: row.title,
            start_time: row.start_time,
            end_time: row.end_time,
            location_text: row.location_text.unwrap_or_default(),
            capacity: row.capacity.and_then(|c| u32::try_from(c).ok()),
            status,
            reminder_sent_at: row.reminder_sent_at,
        })
    }
}

/// A member row joined with the member's profile columns.
///
/// Profile columns are `NULL` when the member has no profile row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberContactRow {
    /// Member user id.
    pub user_id: Uuid,
    /// Profile display name.
    pub display_name: Option<String>,
    /// Profile push token.
    pub expo_push_token: Option<String>,
}

impl From<MemberContactRow> for MemberContact {
    fn from(row: MemberContactRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            display_name: row.display_name,
            push_token: PushToken::from_column(row.expo_push_token),
        }
    }
}

/// A row from the `profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    /// User id.
    pub id: Uuid,
    /// Sign-in email.
    pub email: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Push token.
    pub expo_push_token: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            display_name: row.display_name,
            push_token: PushToken::from_column(row.expo_push_token),
        }
    }
}
