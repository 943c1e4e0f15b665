pub mod claim_purge;
pub mod revalidation_dispatch;
pub mod runner;
pub mod warm_cache;

pub use claim_purge::ClaimPurgeJob;
pub use revalidation_dispatch::RevalidationDispatchJob;
pub use runner::JobRunner;
pub use warm_cache::WarmCacheJob;
