use sqlx::{QueryBuilder, SqlitePool};
use validator::Validate;

use crate::dto::event::{EventDetailResponse, EventResultDetail, SubmitEventRequest};
use crate::error::{Result, StorageError};
use crate::models::{Event, EventResult};

/// Repository for Event database operations. `submit_results` is the write
/// gateway for the result log: every precondition is checked before any
/// row is written, and the event plus all of its results land in one
/// transaction or not at all.
pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one event and all of its per-team results atomically.
    ///
    /// Fails with `Validation` on an empty result set, a rank collision,
    /// a rank outside 1..=participant-count, or negative points; with
    /// `NotFound` when any referenced team does not exist. A partially
    /// recorded event would silently undercount participation, so failure
    /// anywhere rolls the whole submission back.
    pub async fn submit_results(&self, req: &SubmitEventRequest) -> Result<Event> {
        req.validate()?;
        self.ensure_teams_exist(req).await?;

        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (event_date, description, category)
            VALUES (?, ?, ?)
            RETURNING event_id, event_date, description, category, created_at
            "#,
        )
        .bind(req.event_date)
        .bind(&req.description)
        .bind(&req.category)
        .fetch_one(&mut *tx)
        .await?;

        for entry in &req.results {
            sqlx::query(
                r#"
                INSERT INTO event_results (event_id, team_id, points_earned, rank)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(event.event_id)
            .bind(entry.team_id)
            .bind(entry.points_earned)
            .bind(entry.rank)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            event_id = event.event_id,
            teams = req.results.len(),
            category = %event.category,
            "recorded event results"
        );

        Ok(event)
    }

    async fn ensure_teams_exist(&self, req: &SubmitEventRequest) -> Result<()> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM teams WHERE team_id IN (");
        let mut ids = query.separated(", ");
        for entry in &req.results {
            ids.push_bind(entry.team_id);
        }
        query.push(")");

        let found: i64 = query.build_query_scalar().fetch_one(self.pool).await?;

        // Entry team ids are already known to be distinct.
        if found != req.results.len() as i64 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// List all events, most recent first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, event_date, description, category, created_at
            FROM events
            ORDER BY event_date DESC, created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Get an event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, event_date, description, category, created_at
            FROM events
            WHERE event_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Get an event with its per-team results, ordered by rank
    pub async fn get_detail(&self, id: i64) -> Result<EventDetailResponse> {
        let event = self.find_by_id(id).await?;

        let results = sqlx::query_as::<_, EventResultDetail>(
            r#"
            SELECT t.team_name, er.points_earned, er.rank
            FROM event_results er
            JOIN teams t ON er.team_id = t.team_id
            WHERE er.event_id = ?
            ORDER BY er.rank
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(EventDetailResponse {
            event_id: event.event_id,
            event_date: event.event_date,
            description: event.description,
            category: event.category,
            created_at: event.created_at,
            results,
        })
    }

    /// Most recent events with their results
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<EventDetailResponse>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT event_id, event_date, description, category, created_at
            FROM events
            ORDER BY event_date DESC, created_at DESC, event_id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        let mut details = Vec::with_capacity(events.len());
        for event in events {
            details.push(self.get_detail(event.event_id).await?);
        }

        Ok(details)
    }

    /// Snapshot of the full result log for the aggregation engine
    pub async fn list_results(&self) -> Result<Vec<EventResult>> {
        let results = sqlx::query_as::<_, EventResult>(
            r#"
            SELECT event_id, team_id, points_earned, rank
            FROM event_results
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(results)
    }

    /// Delete an event by ID; its results are removed with it
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM events
            WHERE event_id = ?
            "#,
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
