use crate::ports::{DomainRepository, SectionCacheRepository};
use crate::use_cases::revalidation::{LookupAndPersistUseCase, RefreshOutcome};
use chrono::Utc;
use domainstack_domain::{
    CachedSection, DomainError, DomainName, PermanentFailure, Section, SectionResponse,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// What a user sees for one section of a domain report.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    Available {
        record: CachedSection,
        stale: bool,
        /// Another worker is refreshing or a refresh is pending retry.
        refreshing: bool,
    },
    Unavailable(PermanentFailure),
    /// Nothing cached and nothing could be fetched right now.
    Pending,
}

/// Live request path: serves fresh cache directly, otherwise refreshes
/// through the guarded lookup and falls back to stale data.
pub struct GetDomainSectionUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    cache_repo: Arc<dyn SectionCacheRepository>,
    lookup: Arc<LookupAndPersistUseCase>,
}

impl GetDomainSectionUseCase {
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        cache_repo: Arc<dyn SectionCacheRepository>,
        lookup: Arc<LookupAndPersistUseCase>,
    ) -> Self {
        Self {
            domain_repo,
            cache_repo,
            lookup,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        section: Section,
    ) -> Result<SectionView, DomainError> {
        let name = DomainName::parse(domain)?;
        self.domain_repo.ensure(&name).await?;

        let cached = self
            .cache_repo
            .get_cached_section(section, name.as_str())
            .await?;

        if let Some(record) = &cached {
            if !record.is_stale(Utc::now()) {
                return Ok(match &record.failure {
                    Some(failure) => SectionView::Unavailable(failure.clone()),
                    None => SectionView::Available {
                        record: record.clone(),
                        stale: false,
                        refreshing: false,
                    },
                });
            }
        }

        debug!(
            domain = %name,
            section = %section,
            cached = cached.is_some(),
            "Refreshing on read"
        );

        match self.lookup.execute(&name, section).await? {
            RefreshOutcome::Refreshed(SectionResponse::Data(record)) => {
                Ok(SectionView::Available {
                    record,
                    stale: false,
                    refreshing: false,
                })
            }
            RefreshOutcome::Refreshed(SectionResponse::Unavailable { failure, .. }) => {
                Ok(SectionView::Unavailable(failure))
            }
            RefreshOutcome::AlreadyHandled | RefreshOutcome::RetryLater => Ok(match cached {
                Some(CachedSection {
                    failure: Some(failure),
                    ..
                }) => SectionView::Unavailable(failure),
                Some(record) => SectionView::Available {
                    record,
                    stale: true,
                    refreshing: true,
                },
                None => SectionView::Pending,
            }),
        }
    }
}
