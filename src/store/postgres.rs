//! PostgreSQL implementation of [`DataStore`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::DataStore;
use super::models::{EVENT_COLUMNS, EventRow, MemberContactRow, ProfileRow};
use crate::domain::{Event, EventId, EventStatus, MemberContact, Profile, UserId};
use crate::error::NotifierError;

/// PostgreSQL-backed data store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::UpstreamFetch`] if the database cannot be
    /// reached within `connect_timeout`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, NotifierError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| NotifierError::UpstreamFetch(e.to_string()))?;
        Ok(Self::new(pool))
    }
}

fn fetch_err(e: sqlx::Error) -> NotifierError {
    NotifierError::UpstreamFetch(e.to_string())
}

#[async_trait]
impl DataStore for PostgresStore {
    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, NotifierError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(event_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(fetch_err)?;

        row.map(Event::try_from).transpose()
    }

    async fn list_reminder_candidates(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>, NotifierError> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE status = $1 AND start_time >= $2 AND start_time <= $3 \
             AND reminder_sent_at IS NULL \
             ORDER BY start_time ASC"
        ))
        .bind(EventStatus::Active.as_str())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_err)?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn list_member_contacts(
        &self,
        event_id: EventId,
    ) -> Result<Vec<MemberContact>, NotifierError> {
        let rows = sqlx::query_as::<_, MemberContactRow>(
            "SELECT m.user_id, p.display_name, p.expo_push_token \
             FROM event_members m LEFT JOIN profiles p ON p.id = m.user_id \
             WHERE m.event_id = $1",
        )
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(fetch_err)?;

        Ok(rows.into_iter().map(MemberContact::from).collect())
    }

    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>, NotifierError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, email, display_name, expo_push_token FROM profiles WHERE id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(fetch_err)?;

        Ok(row.map(Profile::from))
    }

    async fn mark_reminder_sent(
        &self,
        event_id: EventId,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, NotifierError> {
        let result = sqlx::query(
            "UPDATE events SET reminder_sent_at = $2 \
             WHERE id = $1 AND reminder_sent_at IS NULL",
        )
        .bind(event_id.as_uuid())
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| NotifierError::UpstreamWrite(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
