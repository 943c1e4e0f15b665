pub mod dedup_guard;
pub mod revalidation_backends;

pub use dedup_guard::{absorb_conflict, DedupGuard};
pub use revalidation_backends::{DurableQueueBackend, SweepBackend};
