//! Shared fakes for integration tests: an in-memory data store and a
//! recording push gateway.

#![allow(dead_code, clippy::panic)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use campus_notifier::app_state::AppState;
use campus_notifier::domain::{
    Event, EventId, EventStatus, MemberContact, Profile, PushMessage, PushToken, ReminderWindow,
    UserId,
};
use campus_notifier::error::NotifierError;
use campus_notifier::push::PushGateway;
use campus_notifier::service::{ActionNotifier, NotifyQueue, ReminderSweep};
use campus_notifier::store::DataStore;

/// In-memory stand-in for the backend tables.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    events: RwLock<HashMap<EventId, Event>>,
    members: RwLock<HashMap<EventId, Vec<UserId>>>,
    profiles: RwLock<HashMap<UserId, Profile>>,
    failing_member_reads: RwLock<HashSet<EventId>>,
    fail_candidates: AtomicBool,
    fail_profiles: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_event(&self, event: Event) {
        self.events.write().await.insert(event.id, event);
    }

    pub async fn add_member(&self, event_id: EventId, user_id: UserId) {
        self.members
            .write()
            .await
            .entry(event_id)
            .or_default()
            .push(user_id);
    }

    pub async fn insert_profile(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id, profile);
    }

    pub async fn event(&self, event_id: EventId) -> Event {
        let Some(event) = self.events.read().await.get(&event_id).cloned() else {
            panic!("event {event_id} not in store");
        };
        event
    }

    pub async fn fail_member_reads_for(&self, event_id: EventId) {
        self.failing_member_reads.write().await.insert(event_id);
    }

    pub fn fail_candidate_reads(&self) {
        self.fail_candidates.store(true, Ordering::SeqCst);
    }

    pub fn fail_profile_reads(&self) {
        self.fail_profiles.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, NotifierError> {
        Ok(self.events.read().await.get(&event_id).cloned())
    }

    async fn list_reminder_candidates(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>, NotifierError> {
        if self.fail_candidates.load(Ordering::SeqCst) {
            return Err(NotifierError::UpstreamFetch("events unavailable".to_string()));
        }
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .values()
            .filter(|e| e.is_active() && !e.reminder_sent())
            .filter(|e| e.start_time >= from && e.start_time <= to)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_time);
        Ok(events)
    }

    async fn list_member_contacts(
        &self,
        event_id: EventId,
    ) -> Result<Vec<MemberContact>, NotifierError> {
        if self.failing_member_reads.read().await.contains(&event_id) {
            return Err(NotifierError::UpstreamFetch("members unavailable".to_string()));
        }
        let members = self.members.read().await;
        let profiles = self.profiles.read().await;
        Ok(members
            .get(&event_id)
            .map(|ids| {
                ids.iter()
                    .map(|id| {
                        let profile = profiles.get(id);
                        MemberContact {
                            user_id: *id,
                            display_name: profile.and_then(|p| p.display_name.clone()),
                            push_token: profile.and_then(|p| p.push_token.clone()),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, NotifierError> {
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(NotifierError::UpstreamFetch("profiles unavailable".to_string()));
        }
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn mark_reminder_sent(
        &self,
        event_id: EventId,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, NotifierError> {
        let mut events = self.events.write().await;
        match events.get_mut(&event_id) {
            Some(event) if event.reminder_sent_at.is_none() => {
                event.reminder_sent_at = Some(sent_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Push gateway that records every batch it is given.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    batches: std::sync::Mutex<Vec<Vec<PushMessage>>>,
    fail: AtomicBool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail after recording its batch.
    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn batches(&self) -> Vec<Vec<PushMessage>> {
        match self.batches.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn messages(&self) -> Vec<PushMessage> {
        self.batches().into_iter().flatten().collect()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .map(|m| m.destination_token.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send(&self, messages: &[PushMessage]) -> Result<(), NotifierError> {
        if let Ok(mut guard) = self.batches.lock() {
            guard.push(messages.to_vec());
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifierError::Dispatch("gateway down".to_string()));
        }
        Ok(())
    }
}

pub fn token(raw: &str) -> PushToken {
    let Some(t) = PushToken::parse(raw) else {
        panic!("test token must be non-empty");
    };
    t
}

pub fn profile(id: UserId, display_name: Option<&str>, push_token: Option<&str>) -> Profile {
    Profile {
        id,
        email: None,
        display_name: display_name.map(str::to_string),
        push_token: push_token.map(token),
    }
}

pub fn event_starting_at(host_id: UserId, title: &str, start: DateTime<Utc>) -> Event {
    Event {
        id: EventId::new(),
        host_id,
        title: title.to_string(),
        start_time: start,
        end_time: start + Duration::hours(1),
        location_text: "Ohio Union".to_string(),
        capacity: None,
        status: EventStatus::Active,
        reminder_sent_at: None,
    }
}

/// Store, gateway, and both services wired together.
#[derive(Debug)]
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub gateway: Arc<RecordingGateway>,
    pub notifier: Arc<ActionNotifier>,
    pub sweep: Arc<ReminderSweep>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let gateway = Arc::new(RecordingGateway::new());
        let store_dyn: Arc<dyn DataStore> = Arc::<InMemoryStore>::clone(&store);
        let gateway_dyn: Arc<dyn PushGateway> = Arc::<RecordingGateway>::clone(&gateway);
        let notifier = Arc::new(ActionNotifier::new(
            Arc::clone(&store_dyn),
            Arc::clone(&gateway_dyn),
        ));
        let sweep = Arc::new(ReminderSweep::new(
            store_dyn,
            gateway_dyn,
            ReminderWindow::default(),
        ));
        Self {
            store,
            gateway,
            notifier,
            sweep,
        }
    }

    /// Application state with a running notification queue.
    pub fn app_state(&self, queue_capacity: usize) -> AppState {
        let (notify_queue, _worker) = NotifyQueue::start(Arc::clone(&self.notifier), queue_capacity);
        AppState {
            action_notifier: Arc::clone(&self.notifier),
            reminder_sweep: Arc::clone(&self.sweep),
            notify_queue,
        }
    }
}
