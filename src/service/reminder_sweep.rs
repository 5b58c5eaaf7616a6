//! Reminder sweep: notifies members of events that are about to start.
//!
//! Each run selects active events inside the [`ReminderWindow`] whose
//! `reminder_sent_at` is unset, sends one batch per event, then sets the
//! flag whether or not the batch went out. The flag is the only
//! idempotency guard: overlapping sweeps may both pick the same event
//! before either flags it, and a crash between dispatch and flag can
//! repeat a reminder on the next run.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::profile::push_tokens;
use crate::domain::push_message::build_messages;
use crate::domain::{Event, ReminderWindow};
use crate::error::NotifierError;
use crate::push::PushGateway;
use crate::store::DataStore;

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Candidate events found in the window, including skipped ones.
    pub processed: usize,
    /// Messages accepted by the push gateway.
    pub sent: usize,
    /// Events skipped because their members could not be read.
    pub skipped: usize,
}

/// Periodic start-time reminder job.
#[derive(Debug, Clone)]
pub struct ReminderSweep {
    store: Arc<dyn DataStore>,
    gateway: Arc<dyn PushGateway>,
    window: ReminderWindow,
}

impl ReminderSweep {
    /// Creates a new `ReminderSweep`.
    #[must_use]
    pub fn new(
        store: Arc<dyn DataStore>,
        gateway: Arc<dyn PushGateway>,
        window: ReminderWindow,
    ) -> Self {
        Self {
            store,
            gateway,
            window,
        }
    }

    /// Runs a sweep at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::UpstreamFetch`] if candidate events cannot
    /// be listed. Per-event failures are logged and do not fail the sweep.
    pub async fn run(&self) -> Result<SweepReport, NotifierError> {
        self.run_at(Utc::now()).await
    }

    /// Runs a sweep as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::UpstreamFetch`] if candidate events cannot
    /// be listed, or [`NotifierError::Internal`] if the window cannot be
    /// placed relative to `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<SweepReport, NotifierError> {
        let (from, to) = self.window.bounds(now).ok_or_else(|| {
            NotifierError::Internal(format!("reminder window out of range at {now}"))
        })?;
        let events = self.store.list_reminder_candidates(from, to).await?;

        let mut report = SweepReport {
            processed: events.len(),
            ..SweepReport::default()
        };
        if events.is_empty() {
            tracing::debug!(%from, %to, "no events need reminders");
            return Ok(report);
        }
        tracing::info!(count = events.len(), "processing reminders");

        for event in &events {
            match self.remind(event, now).await {
                Some(sent) => report.sent += sent,
                None => report.skipped += 1,
            }
        }

        tracing::info!(
            processed = report.processed,
            sent = report.sent,
            skipped = report.skipped,
            "reminder sweep finished"
        );
        Ok(report)
    }

    /// Sends the reminder batch for one event and flags it.
    ///
    /// Returns the number of messages sent, or `None` if the event was
    /// skipped and left unflagged for a later sweep.
    async fn remind(&self, event: &Event, now: DateTime<Utc>) -> Option<usize> {
        let event_id = event.id;
        let members = match self.store.list_member_contacts(event_id).await {
            Ok(members) => members,
            Err(e) => {
                tracing::warn!(%event_id, error = %e, "failed to fetch members, skipping event");
                return None;
            }
        };

        let content = self.window.content(event);
        let tokens = push_tokens(&members);
        let messages = build_messages(
            members.iter().map(|m| &m.user_id),
            |id| tokens.get(id).cloned(),
            &content,
            event_id,
        );

        let mut sent = 0;
        if !messages.is_empty() {
            match self.gateway.send(&messages).await {
                Ok(()) => {
                    sent = messages.len();
                    tracing::info!(%event_id, count = sent, size = %event.size(), "reminders sent");
                }
                Err(e) => {
                    tracing::error!(%event_id, error = %e, "failed to send reminders");
                }
            }
        }

        match self.store.mark_reminder_sent(event_id, now).await {
            Ok(true) => {}
            Ok(false) => tracing::warn!(%event_id, "reminder flag was already set"),
            Err(e) => tracing::error!(%event_id, error = %e, "failed to flag reminder as sent"),
        }

        Some(sent)
    }

    /// Spawns a task that runs the sweep every `every`.
    ///
    /// The first run happens immediately. Errors are logged and the
    /// schedule continues. Periods under one second are raised to one
    /// second.
    #[must_use]
    pub fn spawn_periodic(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        let every = every.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run().await {
                    tracing::error!(error = %e, "scheduled reminder sweep failed");
                }
            }
        })
    }
}
