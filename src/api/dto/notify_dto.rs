//! Action notification DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EventId, NotifyAction, NotifyCommand, UserId};
use crate::error::NotifierError;

/// Request body for `POST /notify` and `POST /notify/async`.
///
/// Every field is optional at the wire level so that missing fields are
/// reported together by [`NotifyRequest::validate`] instead of as a
/// deserialization error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NotifyRequest {
    /// One of `join`, `update`, `cancel`.
    #[serde(rename = "type", default)]
    #[schema(example = "join")]
    pub action: Option<String>,
    /// Event the action was performed on (UUID).
    #[serde(default)]
    pub event_id: Option<String>,
    /// User who performed the action (UUID).
    #[serde(default)]
    pub actor_id: Option<String>,
}

impl NotifyRequest {
    /// Validates the request into a [`NotifyCommand`].
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::InvalidRequest`] if a field is missing or
    /// an id is not a UUID, and [`NotifierError::InvalidActionType`] if
    /// `type` is not a known action.
    pub fn validate(&self) -> Result<NotifyCommand, NotifierError> {
        let (Some(action), Some(event_id), Some(actor_id)) = (
            non_empty(self.action.as_deref()),
            non_empty(self.event_id.as_deref()),
            non_empty(self.actor_id.as_deref()),
        ) else {
            return Err(NotifierError::InvalidRequest(
                "missing required fields: type, event_id, actor_id".to_string(),
            ));
        };

        let action: NotifyAction = action.parse()?;
        let event_id: EventId = event_id
            .parse()
            .map_err(|_| NotifierError::InvalidRequest(format!("invalid event_id: {event_id}")))?;
        let actor_id: UserId = actor_id
            .parse()
            .map_err(|_| NotifierError::InvalidRequest(format!("invalid actor_id: {actor_id}")))?;

        Ok(NotifyCommand {
            action,
            event_id,
            actor_id,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Response body for `POST /notify`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotifyResponse {
    /// Messages accepted by the push gateway.
    pub sent: usize,
}

/// Response body for `POST /notify/async`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotifyAccepted {
    /// Always `true`; the command was handed to the queue.
    pub queued: bool,
}
