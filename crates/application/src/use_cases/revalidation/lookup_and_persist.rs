use super::schedule::ScheduleRevalidationUseCase;
use crate::ports::{DomainRepository, SectionCacheRepository, SectionFetcher};
use crate::services::DedupGuard;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use domainstack_domain::{
    decayed_ttl_at, CachedSection, DomainError, DomainName, FetchOutcome, Section,
    SectionResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Refreshed(SectionResponse),
    /// Another worker holds or already completed this refresh.
    AlreadyHandled,
    /// Transient failure; the decayed cadence retries later.
    RetryLater,
}

/// Fetches one section for a domain, persists it with a decayed expiry and
/// schedules the next check. Guarded so concurrent callers for the same
/// domain/section perform the fetch once.
pub struct LookupAndPersistUseCase {
    fetcher: Arc<dyn SectionFetcher>,
    cache_repo: Arc<dyn SectionCacheRepository>,
    domain_repo: Arc<dyn DomainRepository>,
    scheduler: Arc<ScheduleRevalidationUseCase>,
    guard: Arc<DedupGuard>,
}

impl LookupAndPersistUseCase {
    pub fn new(
        fetcher: Arc<dyn SectionFetcher>,
        cache_repo: Arc<dyn SectionCacheRepository>,
        domain_repo: Arc<dyn DomainRepository>,
        scheduler: Arc<ScheduleRevalidationUseCase>,
        guard: Arc<DedupGuard>,
    ) -> Self {
        Self {
            fetcher,
            cache_repo,
            domain_repo,
            scheduler,
            guard,
        }
    }

    pub fn guard_key(domain: &str, section: Section) -> String {
        format!("lookup:{domain}:{section}")
    }

    #[instrument(skip(self, domain), fields(domain = %domain))]
    pub async fn execute(
        &self,
        domain: &DomainName,
        section: Section,
    ) -> Result<RefreshOutcome, DomainError> {
        let key = Self::guard_key(domain.as_str(), section);
        let outcome = self
            .guard
            .run(&key, || self.lookup_and_persist(domain, section))
            .await?;

        Ok(match outcome {
            Some(Some(response)) => RefreshOutcome::Refreshed(response),
            Some(None) => RefreshOutcome::RetryLater,
            None => {
                debug!(key = %key, "Lookup already handled");
                RefreshOutcome::AlreadyHandled
            }
        })
    }

    async fn lookup_and_persist(
        &self,
        domain: &DomainName,
        section: Section,
    ) -> Result<Option<SectionResponse>, DomainError> {
        match self.fetcher.fetch(section, domain.as_str()).await {
            FetchOutcome::Fresh(payload) => {
                let last_accessed = self.domain_repo.get_last_accessed(domain.as_str()).await?;
                let fetched_at = Utc::now();
                let expires_at = decayed_expiry(section, last_accessed, fetched_at);

                let record = CachedSection {
                    domain: domain.to_string(),
                    section,
                    payload,
                    failure: None,
                    fetched_at,
                    expires_at,
                };
                self.cache_repo.upsert_section_record(&record).await?;

                info!(
                    section = %section,
                    expires_at = %expires_at,
                    "Section refreshed"
                );

                if let Err(e) = self
                    .scheduler
                    .execute(domain.as_str(), section, Some(expires_at), last_accessed)
                    .await
                {
                    warn!(section = %section, error = %e, "Failed to schedule next revalidation");
                }

                Ok(Some(SectionResponse::Data(record)))
            }
            FetchOutcome::Permanent(failure) => {
                // The marker gates sweeps and reads until it expires; no
                // revalidation is scheduled for it.
                let last_accessed = self.domain_repo.get_last_accessed(domain.as_str()).await?;
                let fetched_at = Utc::now();
                let expires_at = decayed_expiry(section, last_accessed, fetched_at);
                let marker = CachedSection::unavailable(
                    domain.as_str(),
                    section,
                    failure.clone(),
                    fetched_at,
                    expires_at,
                );
                self.cache_repo.upsert_section_record(&marker).await?;

                info!(
                    section = %section,
                    failure = %failure,
                    recheck_after = %expires_at,
                    "Section permanently unavailable"
                );
                Ok(Some(SectionResponse::Unavailable { section, failure }))
            }
            FetchOutcome::Retry(reason) => {
                warn!(section = %section, reason = %reason, "Section lookup failed, will retry");
                Ok(None)
            }
        }
    }
}

fn decayed_expiry(
    section: Section,
    last_accessed: Option<DateTime<Utc>>,
    fetched_at: DateTime<Utc>,
) -> DateTime<Utc> {
    let ttl = decayed_ttl_at(section, last_accessed, fetched_at);
    fetched_at + ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::days(365))
}
