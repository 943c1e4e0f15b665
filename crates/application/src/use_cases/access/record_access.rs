use crate::ports::{DebounceLedger, DomainRepository};
use chrono::Utc;
use domainstack_domain::DomainName;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Recorded,
    /// A write for this domain was attempted within the debounce window.
    Debounced,
    /// Persistence failed; logged and swallowed.
    Failed,
    Invalid,
}

/// Records that a real user viewed a domain.
///
/// Call only from user-facing request paths. Background refresh work must
/// never call this or the domain never decays.
pub struct RecordAccessUseCase {
    domain_repo: Arc<dyn DomainRepository>,
    ledger: Arc<dyn DebounceLedger>,
}

impl RecordAccessUseCase {
    pub fn new(domain_repo: Arc<dyn DomainRepository>, ledger: Arc<dyn DebounceLedger>) -> Self {
        Self {
            domain_repo,
            ledger,
        }
    }

    /// Fire-and-forget variant for request handlers.
    pub fn record(self: &Arc<Self>, domain: &str) {
        let this = Arc::clone(self);
        let domain = domain.to_string();
        tokio::spawn(async move {
            this.execute(&domain).await;
        });
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> AccessOutcome {
        let name = match DomainName::parse(domain) {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "Ignoring access for invalid domain");
                return AccessOutcome::Invalid;
            }
        };

        let key = format!("access:{name}");
        if !self.ledger.claim(&key).await {
            return AccessOutcome::Debounced;
        }

        match self.domain_repo.update_last_accessed(&name, Utc::now()).await {
            Ok(()) => {
                debug!(domain = %name, "Recorded domain access");
                AccessOutcome::Recorded
            }
            Err(e) => {
                warn!(domain = %name, error = %e, "Failed to record domain access");
                self.ledger.forget(&key).await;
                AccessOutcome::Failed
            }
        }
    }
}
