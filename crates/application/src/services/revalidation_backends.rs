use crate::ports::{RevalidationBackend, RevalidationRequest, WorkflowEvent, WorkflowQueue};
use async_trait::async_trait;
use domainstack_domain::{DomainError, RevalidationMode};
use std::sync::Arc;
use tracing::debug;

/// Push model: one durable delayed event per domain/section, keyed
/// `{domain}:{section}` so the queue itself rejects duplicates.
pub struct DurableQueueBackend {
    queue: Arc<dyn WorkflowQueue>,
}

impl DurableQueueBackend {
    pub fn new(queue: Arc<dyn WorkflowQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl RevalidationBackend for DurableQueueBackend {
    fn mode(&self) -> RevalidationMode {
        RevalidationMode::Push
    }

    async fn schedule(&self, request: RevalidationRequest) -> Result<(), DomainError> {
        let event = WorkflowEvent::revalidate(&request.domain, request.section, request.run_at);
        self.queue.enqueue_delayed(event).await
    }
}

/// Pull model: nothing is scheduled ahead of time; the periodic warm-cache
/// sweep finds stale sections of recently accessed domains.
#[derive(Default)]
pub struct SweepBackend;

impl SweepBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RevalidationBackend for SweepBackend {
    fn mode(&self) -> RevalidationMode {
        RevalidationMode::Pull
    }

    async fn schedule(&self, request: RevalidationRequest) -> Result<(), DomainError> {
        debug!(
            domain = %request.domain,
            section = %request.section,
            due = %request.run_at,
            "Deferring to warm-cache sweep"
        );
        Ok(())
    }
}
