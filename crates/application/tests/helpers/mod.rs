#![allow(dead_code)]

pub mod mock_repositories;

pub use mock_repositories::*;

use domainstack_application::services::{DedupGuard, DurableQueueBackend};
use domainstack_application::use_cases::{
    LookupAndPersistUseCase, ProcessDueRevalidationsUseCase, ScheduleRevalidationUseCase,
    WarmCacheUseCase,
};
use std::sync::Arc;
use std::time::Duration;

/// Push-model wiring over the mock ports.
pub struct Harness {
    pub domains: Arc<MockDomainRepository>,
    pub cache: Arc<MockSectionCache>,
    pub fetcher: Arc<MockFetcher>,
    pub queue: Arc<MockWorkflowQueue>,
    pub claims: Arc<MockClaimStore>,
    pub scheduler: Arc<ScheduleRevalidationUseCase>,
    pub lookup: Arc<LookupAndPersistUseCase>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_fetcher(MockFetcher::new())
    }

    pub fn with_fetcher(fetcher: MockFetcher) -> Self {
        let domains = Arc::new(MockDomainRepository::new());
        let cache = Arc::new(MockSectionCache::new());
        let fetcher = Arc::new(fetcher);
        let queue = Arc::new(MockWorkflowQueue::new());
        let claims = Arc::new(MockClaimStore::new());

        let scheduler = Arc::new(ScheduleRevalidationUseCase::new(
            Arc::new(DurableQueueBackend::new(queue.clone())),
            Arc::new(MockLedger::new(Duration::from_secs(60))),
        ));
        let guard = Arc::new(DedupGuard::new(claims.clone(), Duration::from_secs(300)));
        let lookup = Arc::new(LookupAndPersistUseCase::new(
            fetcher.clone(),
            cache.clone(),
            domains.clone(),
            scheduler.clone(),
            guard,
        ));

        Self {
            domains,
            cache,
            fetcher,
            queue,
            claims,
            scheduler,
            lookup,
        }
    }

    pub fn warm_cache(&self) -> WarmCacheUseCase {
        WarmCacheUseCase::new(self.domains.clone(), self.cache.clone(), self.lookup.clone())
    }

    pub fn dispatcher(&self) -> ProcessDueRevalidationsUseCase {
        ProcessDueRevalidationsUseCase::new(
            self.queue.clone(),
            self.domains.clone(),
            self.lookup.clone(),
            self.scheduler.clone(),
        )
    }
}
