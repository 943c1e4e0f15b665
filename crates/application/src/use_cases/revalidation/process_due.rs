use super::lookup_and_persist::{LookupAndPersistUseCase, RefreshOutcome};
use super::schedule::ScheduleRevalidationUseCase;
use crate::ports::{DomainRepository, WorkflowEvent, WorkflowQueue};
use chrono::{DateTime, Utc};
use domainstack_domain::{
    should_stop_revalidation_at, DomainError, DomainName, SectionResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub events: usize,
    pub refreshed: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventResult {
    Refreshed,
    Skipped,
    Failed,
}

/// Push-model consumer: runs every revalidation event that has come due.
///
/// Events are leased, not removed, while they run. Each one is completed
/// only after its successor is scheduled (or revalidation has stopped), so a
/// crash mid-run leaves the event to be retried when the lease lapses.
/// Transient failures are not retried in a tight loop; the event is
/// rescheduled at the section's decayed cadence instead.
pub struct ProcessDueRevalidationsUseCase {
    queue: Arc<dyn WorkflowQueue>,
    domain_repo: Arc<dyn DomainRepository>,
    lookup: Arc<LookupAndPersistUseCase>,
    scheduler: Arc<ScheduleRevalidationUseCase>,
    lease: Duration,
}

impl ProcessDueRevalidationsUseCase {
    pub fn new(
        queue: Arc<dyn WorkflowQueue>,
        domain_repo: Arc<dyn DomainRepository>,
        lookup: Arc<LookupAndPersistUseCase>,
        scheduler: Arc<ScheduleRevalidationUseCase>,
    ) -> Self {
        Self {
            queue,
            domain_repo,
            lookup,
            scheduler,
            lease: Duration::from_secs(300),
        }
    }

    pub fn with_lease(mut self, lease: Duration) -> Self {
        self.lease = lease;
        self
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, limit: u32) -> Result<DispatchSummary, DomainError> {
        let events = self.queue.take_due(Utc::now(), limit, self.lease).await?;
        let mut summary = DispatchSummary {
            events: events.len(),
            ..Default::default()
        };

        if events.is_empty() {
            debug!("No due revalidation events");
            return Ok(summary);
        }

        for event in events {
            match self.run_event(&event).await {
                EventResult::Refreshed => summary.refreshed += 1,
                EventResult::Skipped => summary.skipped += 1,
                EventResult::Failed => summary.failed += 1,
            }
        }

        info!(
            events = summary.events,
            refreshed = summary.refreshed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Due revalidations processed"
        );

        Ok(summary)
    }

    async fn run_event(&self, event: &WorkflowEvent) -> EventResult {
        let name = match DomainName::parse(&event.domain) {
            Ok(name) => name,
            Err(e) => {
                warn!(event_id = %event.id, error = %e, "Dropping event for invalid domain");
                self.complete(event).await;
                return EventResult::Failed;
            }
        };

        // The pending event this entry stood for is being consumed now.
        self.scheduler.forget(name.as_str(), event.section).await;

        let last_accessed = match self.domain_repo.get_last_accessed(name.as_str()).await {
            Ok(last) => last,
            Err(e) => {
                error!(event_id = %event.id, error = %e, "Cannot read last access, lease left to lapse");
                return EventResult::Failed;
            }
        };

        if should_stop_revalidation_at(event.section, last_accessed, Utc::now()) {
            info!(
                event_id = %event.id,
                last_accessed = ?last_accessed,
                "Domain inactive past cutoff, dropping revalidation"
            );
            self.complete(event).await;
            return EventResult::Skipped;
        }

        let result = match self.lookup.execute(&name, event.section).await {
            Ok(RefreshOutcome::Refreshed(SectionResponse::Data(_))) => EventResult::Refreshed,
            Ok(RefreshOutcome::Refreshed(SectionResponse::Unavailable { .. })) => {
                self.complete(event).await;
                return EventResult::Skipped;
            }
            Ok(RefreshOutcome::AlreadyHandled | RefreshOutcome::RetryLater) => EventResult::Skipped,
            Err(e) => {
                error!(event_id = %event.id, error = %e, "Revalidation event failed");
                EventResult::Failed
            }
        };

        if self.reschedule(event, last_accessed).await {
            self.complete(event).await;
        }
        result
    }

    /// Arranges the next check for the event's pair. Returns false when the
    /// successor could not be scheduled; the lease then lapses and the event
    /// runs again.
    async fn reschedule(
        &self,
        event: &WorkflowEvent,
        last_accessed: Option<DateTime<Utc>>,
    ) -> bool {
        match self
            .scheduler
            .execute(&event.domain, event.section, None, last_accessed)
            .await
        {
            Ok(outcome) => {
                debug!(event_id = %event.id, outcome = ?outcome, "Revalidation rescheduled");
                true
            }
            Err(e) => {
                warn!(event_id = %event.id, error = %e, "Failed to reschedule revalidation");
                false
            }
        }
    }

    async fn complete(&self, event: &WorkflowEvent) {
        if let Err(e) = self.queue.complete(event).await {
            warn!(event_id = %event.id, error = %e, "Failed to complete event");
        }
    }
}
