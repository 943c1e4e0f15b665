use async_trait::async_trait;
use compact_str::CompactString;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use domainstack_application::ports::ClaimStore;
use domainstack_domain::DomainError;
use std::time::{Duration, Instant};
use tracing::debug;

const PURGE_THRESHOLD: usize = 4096;

/// Process-local claims. Only suitable when a single process does all the
/// revalidation work; use [`super::SqliteClaimStore`] otherwise.
pub struct InMemoryClaimStore {
    claims: DashMap<CompactString, Instant>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self {
            claims: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    fn purge(&self) -> usize {
        let before = self.claims.len();
        let now = Instant::now();
        self.claims.retain(|_, until| *until > now);
        let purged = before.saturating_sub(self.claims.len());
        if purged > 0 {
            debug!(purged, "Expired claims purged");
        }
        purged
    }
}

impl Default for InMemoryClaimStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn acquire(&self, key: &str, ttl: Duration) -> Result<(), DomainError> {
        if self.claims.len() > PURGE_THRESHOLD {
            self.purge();
        }

        let now = Instant::now();
        match self.claims.entry(CompactString::new(key)) {
            Entry::Occupied(entry) if *entry.get() > now => Err(DomainError::conflict(key)),
            Entry::Occupied(mut entry) => {
                entry.insert(now + ttl);
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(now + ttl);
                Ok(())
            }
        }
    }

    async fn release(&self, key: &str) -> Result<(), DomainError> {
        self.claims.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        Ok(self.purge() as u64)
    }
}
