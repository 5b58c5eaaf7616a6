//! Campus events as read from the `events` table.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use super::{EventId, UserId};

/// Largest capacity still labelled a small group.
pub const SMALL_GROUP_MAX: u32 = 6;
/// Largest capacity still labelled a medium group.
pub const MEDIUM_GROUP_MAX: u32 = 15;

/// Lifecycle status stored on an event.
///
/// `Canceled` is terminal. An event that runs past its end time stays
/// `Active` in storage; this service never changes the status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Event is scheduled and open.
    Active,
    /// Event was canceled by its host.
    Canceled,
}

impl EventStatus {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "canceled" => Ok(Self::Canceled),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

/// Size bucket derived from an event's optional capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSize {
    /// Up to [`SMALL_GROUP_MAX`] attendees.
    Small,
    /// Up to [`MEDIUM_GROUP_MAX`] attendees.
    Medium,
    /// More than [`MEDIUM_GROUP_MAX`] attendees.
    Large,
    /// No capacity limit.
    Unlimited,
}

impl EventSize {
    /// Buckets a capacity; `None` means unlimited.
    #[must_use]
    pub const fn from_capacity(capacity: Option<u32>) -> Self {
        match capacity {
            None => Self::Unlimited,
            Some(c) if c <= SMALL_GROUP_MAX => Self::Small,
            Some(c) if c <= MEDIUM_GROUP_MAX => Self::Medium,
            Some(_) => Self::Large,
        }
    }

    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Unlimited => "unlimited",
        }
    }
}

impl fmt::Display for EventSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time-bounded campus event.
///
/// `reminder_sent_at` doubles as the reminder idempotency flag: it is set
/// once by the reminder sweep and never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event identifier.
    pub id: EventId,
    /// User hosting the event.
    pub host_id: UserId,
    /// Display title.
    pub title: String,
    /// Scheduled start.
    pub start_time: DateTime<Utc>,
    /// Scheduled end; always after `start_time`.
    pub end_time: DateTime<Utc>,
    /// Free-form location text.
    pub location_text: String,
    /// Maximum attendees, `None` for unlimited.
    pub capacity: Option<u32>,
    /// Lifecycle status.
    pub status: EventStatus,
    /// When the start reminder was processed, if ever.
    pub reminder_sent_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Returns `true` while the event has not been canceled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }

    /// Returns `true` once the reminder sweep has processed this event.
    #[must_use]
    pub fn reminder_sent(&self) -> bool {
        self.reminder_sent_at.is_some()
    }

    /// Size bucket for the event's capacity.
    #[must_use]
    pub const fn size(&self) -> EventSize {
        EventSize::from_capacity(self.capacity)
    }

    /// Capacity rendered for display: the number, or `"unlimited"`.
    #[must_use]
    pub fn capacity_label(&self) -> String {
        self.capacity
            .map_or_else(|| EventSize::Unlimited.to_string(), |c| c.to_string())
    }
}
