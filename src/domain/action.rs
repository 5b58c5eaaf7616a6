//! App actions that trigger notifications, and who hears about them.
//!
//! Three lifecycle transitions are announced: a user joining, the host
//! updating details, and the host canceling. Each resolves to a recipient
//! set and a fixed message template.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::push_message::NotificationContent;
use super::{Event, EventId, MemberContact, UserId};
use crate::error::NotifierError;

/// The action that was just persisted by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyAction {
    /// A user joined the event.
    Join,
    /// The event's details changed.
    Update,
    /// The event was canceled.
    Cancel,
}

impl NotifyAction {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Update => "update",
            Self::Cancel => "cancel",
        }
    }

    /// Resolves who should be notified.
    ///
    /// - `Join`: the host only.
    /// - `Update` / `Cancel`: every current member.
    ///
    /// The actor is always excluded; nobody is notified about their own
    /// action.
    #[must_use]
    pub fn recipients(&self, event: &Event, actor: UserId, members: &[MemberContact]) -> Vec<UserId> {
        match self {
            Self::Join if event.host_id == actor => Vec::new(),
            Self::Join => vec![event.host_id],
            Self::Update | Self::Cancel => members
                .iter()
                .map(|m| m.user_id)
                .filter(|id| *id != actor)
                .collect(),
        }
    }

    /// Builds the title and body for this action.
    ///
    /// `actor_name` is only used by `Join`.
    #[must_use]
    pub fn content(&self, event: &Event, actor_name: &str) -> NotificationContent {
        match self {
            Self::Join => NotificationContent {
                title: "Someone joined your event 🎉".to_string(),
                body: format!("{actor_name} joined {}", event.title),
            },
            Self::Update => NotificationContent {
                title: "Event updated".to_string(),
                body: format!("{} has new details", event.title),
            },
            Self::Cancel => NotificationContent {
                title: "Event canceled".to_string(),
                body: format!("{} was canceled", event.title),
            },
        }
    }
}

impl fmt::Display for NotifyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotifyAction {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "join" => Ok(Self::Join),
            "update" => Ok(Self::Update),
            "cancel" => Ok(Self::Cancel),
            other => Err(NotifierError::InvalidActionType(other.to_string())),
        }
    }
}

/// A validated request to announce an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyCommand {
    /// What happened.
    pub action: NotifyAction,
    /// Event it happened to.
    pub event_id: EventId,
    /// User who did it.
    pub actor_id: UserId,
}
