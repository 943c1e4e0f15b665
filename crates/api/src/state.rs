use domainstack_application::use_cases::{
    GetDomainSectionUseCase, RecordAccessUseCase, WarmCacheUseCase,
};
use domainstack_domain::RevalidationMode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub get_section: Arc<GetDomainSectionUseCase>,
    pub record_access: Arc<RecordAccessUseCase>,
    pub warm_cache: Arc<WarmCacheUseCase>,
    pub mode: RevalidationMode,
    /// Bearer secret for cron triggers; `None` rejects every cron request.
    pub cron_secret: Option<Arc<str>>,
}
