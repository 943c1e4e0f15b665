use domainstack_application::ports::{
    ClaimStore, DomainRepository, SectionCacheRepository, SectionFetcher, WorkflowQueue,
};
use domainstack_domain::Config;
use domainstack_infrastructure::claims::{InMemoryClaimStore, SqliteClaimStore};
use domainstack_infrastructure::lookup::HttpSectionFetcher;
use domainstack_infrastructure::repositories::{
    SqliteDomainRepository, SqliteSectionCacheRepository,
};
use domainstack_infrastructure::workflow::SqliteWorkflowQueue;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

pub struct Repositories {
    pub domains: Arc<dyn DomainRepository>,
    pub section_cache: Arc<dyn SectionCacheRepository>,
    pub workflow_queue: Arc<dyn WorkflowQueue>,
    pub claims: Arc<dyn ClaimStore>,
    pub fetcher: Arc<dyn SectionFetcher>,
}

impl Repositories {
    pub fn new(pool: SqlitePool, config: &Config) -> anyhow::Result<Self> {
        let claims: Arc<dyn ClaimStore> = if config.revalidation.shared_claims {
            Arc::new(SqliteClaimStore::new(pool.clone()))
        } else {
            info!("Using process-local fetch claims");
            Arc::new(InMemoryClaimStore::new())
        };

        Ok(Self {
            domains: Arc::new(SqliteDomainRepository::new(pool.clone())),
            section_cache: Arc::new(SqliteSectionCacheRepository::new(pool.clone())),
            workflow_queue: Arc::new(SqliteWorkflowQueue::new(pool)),
            claims,
            fetcher: Arc::new(HttpSectionFetcher::new(&config.lookup)?),
        })
    }
}
