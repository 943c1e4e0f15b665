use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainstack_domain::{Domain, DomainError, DomainName};

/// Repository interface for tracked domains.
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Returns the domain row, creating it on first lookup.
    ///
    /// # Errors
    ///
    /// * `DomainError::DatabaseError` - If a database error occurs
    async fn ensure(&self, name: &DomainName) -> Result<Domain, DomainError>;

    /// Sets `last_accessed_at` for the domain, creating the row if needed.
    ///
    /// Only user-facing request paths may call this; background jobs calling
    /// it would keep a domain "active" forever and defeat decay.
    async fn update_last_accessed(
        &self,
        name: &DomainName,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Last human access, or `None` when never viewed or unknown.
    async fn get_last_accessed(&self, name: &str) -> Result<Option<DateTime<Utc>>, DomainError>;

    /// Names of domains accessed at or after `since`, most recent first.
    async fn list_recently_accessed(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<String>, DomainError>;
}
