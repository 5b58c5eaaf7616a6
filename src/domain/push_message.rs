//! Outbound push messages.
//!
//! A [`PushMessage`] is built per recipient and handed to the push gateway
//! in a batch. It is never persisted. The serialized shape is the gateway's
//! wire format: `{to, title, body, sound?, data?}`.

use serde::{Deserialize, Serialize};

use super::{EventId, PushToken, UserId};

/// Sound requested for every notification this service sends.
pub const DEFAULT_SOUND: &str = "default";

/// Title and body shared by every message in one fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

/// Deep-link payload attached to a push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushData {
    /// Event the client should open when the notification is tapped.
    pub event_id: EventId,
}

/// One push notification addressed to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Destination device token.
    #[serde(rename = "to")]
    pub destination_token: PushToken,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Sound to play on delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Client-side payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PushData>,
}

impl PushMessage {
    /// Builds the message for one recipient of an event notification.
    #[must_use]
    pub fn for_event(token: PushToken, content: &NotificationContent, event_id: EventId) -> Self {
        Self {
            destination_token: token,
            title: content.title.clone(),
            body: content.body.clone(),
            sound: Some(DEFAULT_SOUND.to_string()),
            data: Some(PushData { event_id }),
        }
    }
}

/// Builds one message per recipient that has a token.
///
/// `token_for` returns the recipient's token, or `None` when the recipient
/// has no reachable device; such recipients are skipped without error.
pub fn build_messages<'a, I, F>(
    recipients: I,
    mut token_for: F,
    content: &NotificationContent,
    event_id: EventId,
) -> Vec<PushMessage>
where
    I: IntoIterator<Item = &'a UserId>,
    F: FnMut(&UserId) -> Option<PushToken>,
{
    let mut messages = Vec::new();
    for user_id in recipients {
        match token_for(user_id) {
            Some(token) => messages.push(PushMessage::for_event(token, content, event_id)),
            None => tracing::debug!(%user_id, %event_id, "no push token, skipping"),
        }
    }
    messages
}
