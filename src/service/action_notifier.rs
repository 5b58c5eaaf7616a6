//! Action notifier: announces a join, update, or cancel to the people who
//! should hear about it.

use std::sync::Arc;

use crate::domain::profile::{FALLBACK_DISPLAY_NAME, Profile, push_tokens};
use crate::domain::push_message::build_messages;
use crate::domain::{Event, NotifyAction, NotifyCommand, PushToken, UserId};
use crate::error::NotifierError;
use crate::push::PushGateway;
use crate::store::DataStore;

/// Resolves recipients and content for an app action and dispatches the
/// resulting batch.
///
/// The triggering action has already been persisted when this runs, so a
/// dispatch failure is logged and swallowed rather than returned.
#[derive(Debug, Clone)]
pub struct ActionNotifier {
    store: Arc<dyn DataStore>,
    gateway: Arc<dyn PushGateway>,
}

impl ActionNotifier {
    /// Creates a new `ActionNotifier`.
    #[must_use]
    pub fn new(store: Arc<dyn DataStore>, gateway: Arc<dyn PushGateway>) -> Self {
        Self { store, gateway }
    }

    /// Notifies the recipients of `command` and returns how many messages
    /// the gateway accepted.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::EventNotFound`] if the event does not
    /// exist, or [`NotifierError::UpstreamFetch`] if the event or its
    /// members cannot be read. Dispatch failures are not errors.
    pub async fn notify(&self, command: &NotifyCommand) -> Result<usize, NotifierError> {
        let NotifyCommand {
            action,
            event_id,
            actor_id,
        } = *command;

        let (event, members, actor_name) = tokio::try_join!(
            self.load_event(command),
            self.store.list_member_contacts(event_id),
            self.actor_name(action, actor_id),
        )?;

        let recipients = action.recipients(&event, actor_id, &members);
        if recipients.is_empty() {
            tracing::info!(%event_id, %action, "no recipients");
            return Ok(0);
        }

        let mut tokens = push_tokens(&members);
        if action == NotifyAction::Join
            && !tokens.contains_key(&event.host_id)
            && let Some(token) = self.host_token(&event).await
        {
            tokens.insert(event.host_id, token);
        }

        let content = action.content(&event, &actor_name);
        let messages = build_messages(
            recipients.iter(),
            |id| tokens.get(id).cloned(),
            &content,
            event_id,
        );
        if messages.is_empty() {
            tracing::info!(%event_id, %action, "no push tokens for recipients");
            return Ok(0);
        }

        match self.gateway.send(&messages).await {
            Ok(()) => {
                tracing::info!(%event_id, %action, count = messages.len(), "notifications sent");
                Ok(messages.len())
            }
            Err(e) => {
                tracing::error!(%event_id, %action, error = %e, "failed to send notifications");
                Ok(0)
            }
        }
    }

    async fn load_event(&self, command: &NotifyCommand) -> Result<Event, NotifierError> {
        self.store
            .find_event(command.event_id)
            .await?
            .ok_or(NotifierError::EventNotFound(command.event_id))
    }

    /// Name shown in a join message. Lookup failures fall back to a
    /// generic name; other actions never need it.
    async fn actor_name(
        &self,
        action: NotifyAction,
        actor_id: UserId,
    ) -> Result<String, NotifierError> {
        if action != NotifyAction::Join {
            return Ok(FALLBACK_DISPLAY_NAME.to_string());
        }
        match self.store.find_profile(actor_id).await {
            Ok(profile) => Ok(profile.as_ref().map_or_else(
                || FALLBACK_DISPLAY_NAME.to_string(),
                Profile::display_label,
            )),
            Err(e) => {
                tracing::warn!(%actor_id, error = %e, "actor profile lookup failed");
                Ok(FALLBACK_DISPLAY_NAME.to_string())
            }
        }
    }

    /// Host may not be a member of their own event, so look the token up
    /// directly.
    async fn host_token(&self, event: &Event) -> Option<PushToken> {
        match self.store.find_profile(event.host_id).await {
            Ok(profile) => profile.and_then(|p| p.push_token),
            Err(e) => {
                tracing::warn!(host_id = %event.host_id, error = %e, "host profile lookup failed");
                None
            }
        }
    }
}
