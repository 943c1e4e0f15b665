use async_trait::async_trait;
use domainstack_domain::{FetchOutcome, Section};

/// External collaborator that performs the actual network lookup for a
/// section (DNS, RDAP/WHOIS, TLS handshake, HTTP fetch...).
///
/// Implementations own their transport-level timeout and retry policy and
/// report every failure through [`FetchOutcome`] instead of an error.
#[async_trait]
pub trait SectionFetcher: Send + Sync {
    async fn fetch(&self, section: Section, domain: &str) -> FetchOutcome;
}
