use async_trait::async_trait;
use domainstack_domain::{CachedSection, DomainError, Section};

#[async_trait]
pub trait SectionCacheRepository: Send + Sync {
    /// Cached record for the pair, or `None` when nothing was ever persisted.
    async fn get_cached_section(
        &self,
        section: Section,
        domain: &str,
    ) -> Result<Option<CachedSection>, DomainError>;

    /// Insert or replace the record for `(record.domain, record.section)`.
    async fn upsert_section_record(&self, record: &CachedSection) -> Result<(), DomainError>;
}
