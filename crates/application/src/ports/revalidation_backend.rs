use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainstack_domain::{DomainError, RevalidationMode, Section};

#[derive(Debug, Clone, PartialEq)]
pub struct RevalidationRequest {
    pub domain: String,
    pub section: Section,
    pub run_at: DateTime<Utc>,
}

/// Strategy for arranging the next refresh of a domain/section.
#[async_trait]
pub trait RevalidationBackend: Send + Sync {
    fn mode(&self) -> RevalidationMode;

    /// # Errors
    ///
    /// * `DomainError::Conflict` - The backend already holds this request
    async fn schedule(&self, request: RevalidationRequest) -> Result<(), DomainError>;
}
