use crate::database::{db_error, from_millis, to_millis};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use domainstack_application::ports::{WorkflowEvent, WorkflowQueue};
use domainstack_domain::{DomainError, Section};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

type EventRow = (String, String, String, String, i64);

/// Durable delayed-event queue on SQLite.
///
/// The event id is the primary key, so a second enqueue for the same
/// domain/section while one is pending fails with `DomainError::Conflict`.
/// Due events are leased with `UPDATE ... RETURNING`, which hands each row
/// to one dispatcher at a time even when several processes share the file.
/// Rows are deleted only by `complete`; a lapsed lease makes them due again.
pub struct SqliteWorkflowQueue {
    pool: SqlitePool,
}

impl SqliteWorkflowQueue {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn pending_count(&self) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workflow_events")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count pending events"))?;
        Ok(count.max(0) as u64)
    }

    async fn discard(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM workflow_events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to discard event"))?;
        Ok(())
    }
}

#[async_trait]
impl WorkflowQueue for SqliteWorkflowQueue {
    #[instrument(skip(self, event), fields(event_id = %event.id, run_at = %event.run_at))]
    async fn enqueue_delayed(&self, event: WorkflowEvent) -> Result<(), DomainError> {
        let result = sqlx::query(
            "INSERT INTO workflow_events (id, name, domain, section, run_at, created_at, locked_until)
             VALUES (?, ?, ?, ?, ?, ?, NULL)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                domain = excluded.domain,
                section = excluded.section,
                run_at = excluded.run_at,
                created_at = excluded.created_at,
                locked_until = NULL
             WHERE workflow_events.locked_until IS NOT NULL",
        )
        .bind(&event.id)
        .bind(&event.name)
        .bind(&event.domain)
        .bind(event.section.as_str())
        .bind(to_millis(event.run_at))
        .bind(to_millis(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to enqueue event");
            DomainError::Workflow(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::conflict(event.id));
        }

        debug!("Event enqueued");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn take_due(
        &self,
        now: DateTime<Utc>,
        limit: u32,
        lease: Duration,
    ) -> Result<Vec<WorkflowEvent>, DomainError> {
        let now_ms = to_millis(now);
        let locked_until = now
            .checked_add_signed(ChronoDuration::from_std(lease).unwrap_or(ChronoDuration::MAX))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let rows = sqlx::query_as::<_, EventRow>(
            "UPDATE workflow_events SET locked_until = ?
             WHERE id IN (
                 SELECT id FROM workflow_events
                 WHERE run_at <= ? AND (locked_until IS NULL OR locked_until <= ?)
                 ORDER BY run_at
                 LIMIT ?
             )
             RETURNING id, name, domain, section, run_at",
        )
        .bind(to_millis(locked_until))
        .bind(now_ms)
        .bind(now_ms)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to lease due events");
            DomainError::Workflow(e.to_string())
        })?;

        let mut events = Vec::with_capacity(rows.len());
        for (id, name, domain, section, run_at) in rows {
            match section.parse::<Section>() {
                Ok(section) => events.push(WorkflowEvent {
                    id,
                    name,
                    domain,
                    section,
                    run_at: from_millis(run_at),
                }),
                Err(e) => {
                    warn!(event_id = %id, error = %e, "Discarding event with unknown section");
                    self.discard(&id).await?;
                }
            }
        }
        events.sort_by_key(|e| e.run_at);
        Ok(events)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn complete(&self, event: &WorkflowEvent) -> Result<(), DomainError> {
        let result = sqlx::query(
            "DELETE FROM workflow_events
             WHERE id = ? AND run_at = ? AND locked_until IS NOT NULL",
        )
        .bind(&event.id)
        .bind(to_millis(event.run_at))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to complete event"))?;

        if result.rows_affected() == 0 {
            debug!("Event was rescheduled while leased, keeping it");
        }
        Ok(())
    }
}
