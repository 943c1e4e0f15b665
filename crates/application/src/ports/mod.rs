pub mod claim_store;
pub mod debounce_ledger;
pub mod domain_repository;
pub mod revalidation_backend;
pub mod section_cache_repository;
pub mod section_fetcher;
pub mod workflow_queue;

pub use claim_store::ClaimStore;
pub use debounce_ledger::DebounceLedger;
pub use domain_repository::DomainRepository;
pub use revalidation_backend::{RevalidationBackend, RevalidationRequest};
pub use section_cache_repository::SectionCacheRepository;
pub use section_fetcher::SectionFetcher;
pub use workflow_queue::{WorkflowEvent, WorkflowQueue, REVALIDATE_EVENT};
