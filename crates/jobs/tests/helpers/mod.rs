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

pub struct Wiring {
    pub domains: Arc<MockDomainRepository>,
    pub cache: Arc<MockSectionCache>,
    pub fetcher: Arc<MockFetcher>,
    pub queue: Arc<MockWorkflowQueue>,
    pub claims: Arc<MockClaimStore>,
    pub dispatch: Arc<ProcessDueRevalidationsUseCase>,
    pub warm_cache: Arc<WarmCacheUseCase>,
}

impl Wiring {
    pub fn new() -> Self {
        let domains = Arc::new(MockDomainRepository::new());
        let cache = Arc::new(MockSectionCache::new());
        let fetcher = Arc::new(MockFetcher::new());
        let queue = Arc::new(MockWorkflowQueue::new());
        let claims = Arc::new(MockClaimStore::new());

        let scheduler = Arc::new(ScheduleRevalidationUseCase::new(
            Arc::new(DurableQueueBackend::new(queue.clone())),
            Arc::new(MockLedger::new()),
        ));
        let lookup = Arc::new(LookupAndPersistUseCase::new(
            fetcher.clone(),
            cache.clone(),
            domains.clone(),
            scheduler.clone(),
            Arc::new(DedupGuard::new(claims.clone(), Duration::from_secs(300))),
        ));
        let dispatch = Arc::new(ProcessDueRevalidationsUseCase::new(
            queue.clone(),
            domains.clone(),
            lookup.clone(),
            scheduler,
        ));
        let warm_cache = Arc::new(WarmCacheUseCase::new(
            domains.clone(),
            cache.clone(),
            lookup,
        ));

        Self {
            domains,
            cache,
            fetcher,
            queue,
            claims,
            dispatch,
            warm_cache,
        }
    }
}
