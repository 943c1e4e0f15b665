use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainstack_domain::{DomainError, Section};
use std::time::Duration;

pub const REVALIDATE_EVENT: &str = "section/revalidate";

/// A delayed unit of work in the durable execution backend.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowEvent {
    /// Idempotency key; the backend refuses a second event with the same id.
    pub id: String,
    pub name: String,
    pub domain: String,
    pub section: Section,
    pub run_at: DateTime<Utc>,
}

impl WorkflowEvent {
    pub fn revalidate(domain: &str, section: Section, run_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("{domain}:{section}"),
            name: REVALIDATE_EVENT.to_string(),
            domain: domain.to_string(),
            section,
            run_at,
        }
    }
}

#[async_trait]
pub trait WorkflowQueue: Send + Sync {
    /// Enqueue an event to run at `event.run_at`.
    ///
    /// An event with the same id that is currently leased by a dispatcher is
    /// replaced, so work in flight can arrange its own successor.
    ///
    /// # Errors
    ///
    /// * `DomainError::Conflict` - An unleased event with the same id is pending
    /// * `DomainError::DatabaseError` / `DomainError::Workflow` - Backend failure
    async fn enqueue_delayed(&self, event: WorkflowEvent) -> Result<(), DomainError>;

    /// Leases up to `limit` events due at `now`, oldest first. A leased event
    /// is hidden from other callers until `lease` lapses or it is completed,
    /// so a dispatcher that dies mid-run leaves the event to be picked up
    /// again.
    async fn take_due(
        &self,
        now: DateTime<Utc>,
        limit: u32,
        lease: Duration,
    ) -> Result<Vec<WorkflowEvent>, DomainError>;

    /// Removes a leased event once it has been handled. An event replaced by
    /// `enqueue_delayed` since it was taken is left alone.
    async fn complete(&self, event: &WorkflowEvent) -> Result<(), DomainError>;
}
