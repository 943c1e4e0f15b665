use async_trait::async_trait;
use domainstack_domain::DomainError;
use std::time::Duration;

/// Short-lived exclusive claims on a work key.
///
/// Must be shared across processes when several workers run, otherwise the
/// at-most-one-execution guarantee only holds per process.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Takes the claim for `ttl`.
    ///
    /// # Errors
    ///
    /// * `DomainError::Conflict` - Another live claim exists for `key`
    async fn acquire(&self, key: &str, ttl: Duration) -> Result<(), DomainError>;

    async fn release(&self, key: &str) -> Result<(), DomainError>;

    /// Drops claims whose TTL has passed. Returns how many were removed.
    async fn purge_expired(&self) -> Result<u64, DomainError>;
}
