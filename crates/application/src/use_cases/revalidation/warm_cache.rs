use super::lookup_and_persist::{LookupAndPersistUseCase, RefreshOutcome};
use crate::ports::{DomainRepository, SectionCacheRepository};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use domainstack_domain::{
    should_stop_revalidation_at, DomainError, DomainName, Section, SectionResponse,
};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmCacheSummary {
    pub domains: usize,
    pub domains_failed: usize,
    pub sections_refreshed: usize,
    pub sections_skipped: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct DomainTally {
    refreshed: usize,
    skipped: usize,
}

/// Pull-model sweep: refreshes stale sections of recently accessed domains,
/// a bounded batch of domains at a time.
pub struct WarmCacheUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    cache_repo: Arc<dyn SectionCacheRepository>,
    lookup: Arc<LookupAndPersistUseCase>,
    lookback_hours: u32,
    batch_size: usize,
    limit: u32,
}

impl WarmCacheUseCase {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        cache_repo: Arc<dyn SectionCacheRepository>,
        lookup: Arc<LookupAndPersistUseCase>,
    ) -> Self {
        Self {
            domain_repo,
            cache_repo,
            lookup,
            lookback_hours: 24,
            batch_size: 10,
            limit: 1000,
        }
    }

    pub fn with_lookback_hours(mut self, hours: u32) -> Self {
        self.lookback_hours = hours;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Fails only when the domain listing itself fails; per-domain errors are
    /// counted in `domains_failed`.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<WarmCacheSummary, DomainError> {
        let now = Utc::now();
        let since = now - ChronoDuration::hours(i64::from(self.lookback_hours));
        let domains = self
            .domain_repo
            .list_recently_accessed(since, self.limit)
            .await?;

        let mut summary = WarmCacheSummary {
            domains: domains.len(),
            ..Default::default()
        };

        if domains.is_empty() {
            debug!("No recently accessed domains to warm");
            return Ok(summary);
        }

        for batch in domains.chunks(self.batch_size) {
            let results = join_all(batch.iter().map(|domain| self.warm_domain(domain, now))).await;

            for (domain, result) in batch.iter().zip(results) {
                match result {
                    Ok(tally) => {
                        summary.sections_refreshed += tally.refreshed;
                        summary.sections_skipped += tally.skipped;
                    }
                    Err(e) => {
                        error!(domain = %domain, error = %e, "Failed to warm domain");
                        summary.domains_failed += 1;
                    }
                }
            }
        }

        info!(
            domains = summary.domains,
            domains_failed = summary.domains_failed,
            sections_refreshed = summary.sections_refreshed,
            sections_skipped = summary.sections_skipped,
            "Warm-cache sweep completed"
        );

        Ok(summary)
    }

    async fn warm_domain(
        &self,
        domain: &str,
        now: DateTime<Utc>,
    ) -> Result<DomainTally, DomainError> {
        let name = DomainName::parse(domain)?;
        let last_accessed = self.domain_repo.get_last_accessed(name.as_str()).await?;
        let mut tally = DomainTally::default();

        for section in Section::ALL {
            if should_stop_revalidation_at(section, last_accessed, now) {
                tally.skipped += 1;
                continue;
            }

            let cached = self
                .cache_repo
                .get_cached_section(section, name.as_str())
                .await?;
            if cached.as_ref().is_some_and(|c| !c.is_stale(now)) {
                tally.skipped += 1;
                continue;
            }

            match self.lookup.execute(&name, section).await? {
                RefreshOutcome::Refreshed(SectionResponse::Data(_)) => tally.refreshed += 1,
                RefreshOutcome::Refreshed(SectionResponse::Unavailable { .. })
                | RefreshOutcome::AlreadyHandled
                | RefreshOutcome::RetryLater => tally.skipped += 1,
            }
        }

        Ok(tally)
    }
}
