//! Event repository for database operations

use chrono::{NaiveDate, Utc};
use common::error::DatabaseResult;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Event, NewEvent};

const EVENT_COLUMNS: &str = "id, account, title, event_date, start_time, end_time, location, \
     description, created_at, updated_at";

/// Event repository
#[derive(Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List an account's events, optionally bounded by inclusive dates
    pub async fn list(
        &self,
        account: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> DatabaseResult<Vec<Event>> {
        // Untimed events sort first within a day
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE account = ?
                AND (? IS NULL OR event_date >= ?)
                AND (? IS NULL OR event_date <= ?)
            ORDER BY event_date, start_time IS NOT NULL, start_time, id
            "#
        ))
        .bind(account)
        .bind(from)
        .bind(from)
        .bind(to)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn create(&self, account: &str, event: &NewEvent) -> DatabaseResult<Event> {
        info!(
            "Creating event '{}' on {} for {}",
            event.title, event.event_date, account
        );

        let now = Utc::now();
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (account, title, event_date, start_time, end_time, location,
                                description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(account)
        .bind(&event.title)
        .bind(event.event_date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.location)
        .bind(&event.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn update(
        &self,
        id: i64,
        account: &str,
        event: &NewEvent,
    ) -> DatabaseResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET title = ?, event_date = ?, start_time = ?, end_time = ?, location = ?,
                description = ?, updated_at = ?
            WHERE id = ? AND account = ?
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&event.title)
        .bind(event.event_date)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.location)
        .bind(&event.description)
        .bind(Utc::now())
        .bind(id)
        .bind(account)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn delete(&self, id: i64, account: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ? AND account = ?")
            .bind(id)
            .bind(account)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
