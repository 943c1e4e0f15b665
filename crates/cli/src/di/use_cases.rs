use super::Repositories;
use domainstack_application::ports::RevalidationBackend;
use domainstack_application::services::{DedupGuard, DurableQueueBackend, SweepBackend};
use domainstack_application::use_cases::{
    GetDomainSectionUseCase, LookupAndPersistUseCase, ProcessDueRevalidationsUseCase,
    RecordAccessUseCase, ScheduleRevalidationUseCase, WarmCacheUseCase,
};
use domainstack_domain::{Config, RevalidationMode};
use domainstack_infrastructure::ledger::LruDebounceLedger;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub record_access: Arc<RecordAccessUseCase>,
    pub get_section: Arc<GetDomainSectionUseCase>,
    pub warm_cache: Arc<WarmCacheUseCase>,
    pub dispatch: Arc<ProcessDueRevalidationsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> Self {
        let r = &config.revalidation;

        let ledger = |window: Duration| {
            Arc::new(LruDebounceLedger::new(
                window,
                r.ledger_high_water,
                r.ledger_target,
                r.ledger_capacity,
            ))
        };

        let backend: Arc<dyn RevalidationBackend> = match r.mode {
            RevalidationMode::Push => {
                Arc::new(DurableQueueBackend::new(repos.workflow_queue.clone()))
            }
            RevalidationMode::Pull => Arc::new(SweepBackend::new()),
        };

        let scheduler = Arc::new(ScheduleRevalidationUseCase::new(
            backend,
            ledger(r.schedule_dedup()),
        ));
        let guard = Arc::new(DedupGuard::new(repos.claims.clone(), r.claim_ttl()));

        let lookup = Arc::new(LookupAndPersistUseCase::new(
            repos.fetcher.clone(),
            repos.section_cache.clone(),
            repos.domains.clone(),
            scheduler.clone(),
            guard,
        ));

        Self {
            record_access: Arc::new(RecordAccessUseCase::new(
                repos.domains.clone(),
                ledger(r.access_debounce()),
            )),
            get_section: Arc::new(GetDomainSectionUseCase::new(
                repos.domains.clone(),
                repos.section_cache.clone(),
                lookup.clone(),
            )),
            warm_cache: Arc::new(
                WarmCacheUseCase::new(
                    repos.domains.clone(),
                    repos.section_cache.clone(),
                    lookup.clone(),
                )
                .with_lookback_hours(r.lookback_hours)
                .with_batch_size(r.batch_size)
                .with_limit(r.sweep_limit),
            ),
            dispatch: Arc::new(
                ProcessDueRevalidationsUseCase::new(
                    repos.workflow_queue.clone(),
                    repos.domains.clone(),
                    lookup,
                    scheduler,
                )
                .with_lease(r.dispatch_lease()),
            ),
        }
    }
}
