pub mod lookup_and_persist;
pub mod process_due;
pub mod schedule;
pub mod warm_cache;

pub use lookup_and_persist::{LookupAndPersistUseCase, RefreshOutcome};
pub use process_due::{DispatchSummary, ProcessDueRevalidationsUseCase};
pub use schedule::{ScheduleOutcome, ScheduleRevalidationUseCase};
pub use warm_cache::{WarmCacheSummary, WarmCacheUseCase};
