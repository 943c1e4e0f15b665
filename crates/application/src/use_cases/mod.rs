pub mod access;
pub mod revalidation;
pub mod sections;

pub use access::{AccessOutcome, RecordAccessUseCase};
pub use revalidation::{
    DispatchSummary, LookupAndPersistUseCase, ProcessDueRevalidationsUseCase, RefreshOutcome,
    ScheduleOutcome, ScheduleRevalidationUseCase, WarmCacheSummary, WarmCacheUseCase,
};
pub use sections::{GetDomainSectionUseCase, SectionView};
