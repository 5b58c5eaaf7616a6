//! Start-time reminder window.
//!
//! The sweep looks for events starting between `now + earliest_lead` and
//! `now + latest_lead` (both inclusive). The window is wider than the
//! sweep cadence so scheduler jitter does not drop events; a cadence
//! coarser than the window width can skip events entirely.

use chrono::{DateTime, Duration, Utc};

use super::{Event, push_message::NotificationContent};

/// Default lower bound of the window, in minutes from now.
pub const DEFAULT_EARLIEST_LEAD_MINS: i64 = 12;
/// Default upper bound of the window, in minutes from now.
pub const DEFAULT_LATEST_LEAD_MINS: i64 = 18;
/// Largest accepted upper bound: one day ahead.
pub const MAX_LEAD_MINS: i64 = 24 * 60;

/// Title of every start reminder.
pub const REMINDER_TITLE: &str = "Starting soon ⏰";

/// Lead-time window used to select events for a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    earliest_lead: Duration,
    latest_lead: Duration,
}

impl ReminderWindow {
    /// Creates a window from minute offsets.
    ///
    /// Returns `None` unless `0 <= earliest < latest <= MAX_LEAD_MINS`.
    #[must_use]
    pub fn from_minutes(earliest: i64, latest: i64) -> Option<Self> {
        if earliest < 0 || earliest >= latest || latest > MAX_LEAD_MINS {
            return None;
        }
        Some(Self {
            earliest_lead: Duration::try_minutes(earliest)?,
            latest_lead: Duration::try_minutes(latest)?,
        })
    }

    /// Absolute `(from, to)` bounds for a sweep running at `now`, or `None`
    /// if either bound is past the representable range.
    #[must_use]
    pub fn bounds(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((
            now.checked_add_signed(self.earliest_lead)?,
            now.checked_add_signed(self.latest_lead)?,
        ))
    }

    /// Width of the window. A sweep cadence above this can miss events.
    #[must_use]
    pub fn width(&self) -> Duration {
        self.latest_lead - self.earliest_lead
    }

    /// Lead time quoted to users: the window midpoint, in whole minutes.
    #[must_use]
    pub fn nominal_lead_minutes(&self) -> i64 {
        (self.earliest_lead.num_minutes() + self.latest_lead.num_minutes()) / 2
    }

    /// Builds the reminder title and body for an event.
    #[must_use]
    pub fn content(&self, event: &Event) -> NotificationContent {
        NotificationContent {
            title: REMINDER_TITLE.to_string(),
            body: format!(
                "{} starts in {} minutes",
                event.title,
                self.nominal_lead_minutes()
            ),
        }
    }
}

impl Default for ReminderWindow {
    fn default() -> Self {
        Self {
            earliest_lead: Duration::minutes(DEFAULT_EARLIEST_LEAD_MINS),
            latest_lead: Duration::minutes(DEFAULT_LATEST_LEAD_MINS),
        }
    }
}
