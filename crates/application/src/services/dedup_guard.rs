use crate::ports::ClaimStore;
use domainstack_domain::DomainError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Turns a concurrency conflict into "already handled".
///
/// `Conflict` becomes `Ok(None)`, success becomes `Ok(Some(_))`, and every
/// other error is returned unchanged.
pub fn absorb_conflict<T>(result: Result<T, DomainError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(DomainError::Conflict { key }) => {
            debug!(key = %key, "Work already handled by another worker");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Ensures at most one worker performs the side effect behind a key per
/// claim window.
///
/// Per key: `unstarted -> in-progress -> done` when the claim is taken, or
/// `unstarted -> already-handled` when it is not. Genuine failures release
/// the claim and propagate.
pub struct DedupGuard {
    claims: Arc<dyn ClaimStore>,
    claim_ttl: Duration,
}

impl DedupGuard {
    pub fn new(claims: Arc<dyn ClaimStore>, claim_ttl: Duration) -> Self {
        Self { claims, claim_ttl }
    }

    pub async fn run<T, F, Fut>(&self, key: &str, op: F) -> Result<Option<T>, DomainError>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
        T: Send,
    {
        if absorb_conflict(self.claims.acquire(key, self.claim_ttl).await)?.is_none() {
            return Ok(None);
        }

        match absorb_conflict(op().await) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                if let Err(release_err) = self.claims.release(key).await {
                    warn!(key = %key, error = %release_err, "Failed to release claim");
                }
                Err(e)
            }
        }
    }
}
