//! Fire-and-forget hand-off for action notifications.
//!
//! [`NotifyQueue`] wraps a bounded [`tokio::sync::mpsc`] channel drained by
//! a single worker task that runs the [`ActionNotifier`]. Callers submit a
//! command and move on: they never await delivery, and a notification
//! failure must not be treated as a failure of the action that caused it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use super::ActionNotifier;
use crate::domain::NotifyCommand;
use crate::error::NotifierError;

/// Sending half of the notification queue.
///
/// Cheap to clone; every clone feeds the same worker. The worker exits
/// once all clones are dropped and the backlog is drained.
#[derive(Debug, Clone)]
pub struct NotifyQueue {
    sender: mpsc::Sender<NotifyCommand>,
}

impl NotifyQueue {
    /// Creates the queue and spawns its worker.
    ///
    /// A `capacity` of zero is raised to one.
    #[must_use]
    pub fn start(notifier: Arc<ActionNotifier>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::channel::<NotifyCommand>(capacity.max(1));

        let worker = tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                let NotifyCommand {
                    action, event_id, ..
                } = command;
                match notifier.notify(&command).await {
                    Ok(sent) => tracing::debug!(%event_id, %action, sent, "queued notification done"),
                    Err(e) => {
                        tracing::warn!(%event_id, %action, error = %e, "queued notification failed");
                    }
                }
            }
            tracing::debug!("notification queue closed");
        });

        (Self { sender }, worker)
    }

    /// Enqueues a command without waiting for it to run.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::QueueUnavailable`] if the queue is full or
    /// its worker has stopped.
    pub fn submit(&self, command: NotifyCommand) -> Result<(), NotifierError> {
        self.sender.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => NotifierError::QueueUnavailable("queue is full".to_string()),
            TrySendError::Closed(_) => {
                NotifierError::QueueUnavailable("worker has stopped".to_string())
            }
        })
    }

    /// Number of commands that can still be enqueued right now.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        self.sender.capacity()
    }
}
