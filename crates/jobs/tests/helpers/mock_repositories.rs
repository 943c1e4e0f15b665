#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainstack_application::ports::{
    ClaimStore, DebounceLedger, DomainRepository, SectionCacheRepository, SectionFetcher,
    WorkflowEvent, WorkflowQueue,
};
use domainstack_domain::{CachedSection, Domain, DomainError, DomainName, FetchOutcome, Section};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

// ============================================================================
// Mock DomainRepository
// ============================================================================

pub struct MockDomainRepository {
    accessed: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockDomainRepository {
    pub fn new() -> Self {
        Self {
            accessed: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn touch(&self, domain: &str) {
        self.accessed
            .write()
            .await
            .insert(domain.to_string(), Utc::now());
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn ensure(&self, name: &DomainName) -> Result<Domain, DomainError> {
        Ok(Domain::new(name.clone()))
    }

    async fn update_last_accessed(
        &self,
        name: &DomainName,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.accessed.write().await.insert(name.to_string(), at);
        Ok(())
    }

    async fn get_last_accessed(&self, name: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
        Ok(self.accessed.read().await.get(name).copied())
    }

    async fn list_recently_accessed(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<String>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError("database unavailable".to_string()));
        }
        Ok(self
            .accessed
            .read()
            .await
            .iter()
            .filter(|(_, at)| **at >= since)
            .take(limit as usize)
            .map(|(d, _)| d.clone())
            .collect())
    }
}

// ============================================================================
// Mock SectionCacheRepository / SectionFetcher
// ============================================================================

pub struct MockSectionCache {
    records: Arc<RwLock<HashMap<(String, Section), CachedSection>>>,
}

impl MockSectionCache {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SectionCacheRepository for MockSectionCache {
    async fn get_cached_section(
        &self,
        section: Section,
        domain: &str,
    ) -> Result<Option<CachedSection>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .get(&(domain.to_string(), section))
            .cloned())
    }

    async fn upsert_section_record(&self, record: &CachedSection) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .insert((record.domain.clone(), record.section), record.clone());
        Ok(())
    }
}

pub struct MockFetcher {
    call_count: Arc<AtomicU64>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SectionFetcher for MockFetcher {
    async fn fetch(&self, section: Section, domain: &str) -> FetchOutcome {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        FetchOutcome::Fresh(serde_json::json!({ "domain": domain, "section": section }))
    }
}

// ============================================================================
// Mock WorkflowQueue
// ============================================================================

pub struct MockWorkflowQueue {
    events: Arc<RwLock<HashMap<String, (WorkflowEvent, bool)>>>,
    take_calls: Arc<AtomicU64>,
}

impl MockWorkflowQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            take_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn insert_due(&self, domain: &str, section: Section) {
        let event = WorkflowEvent::revalidate(domain, section, Utc::now());
        self.events
            .write()
            .await
            .insert(event.id.clone(), (event, false));
    }

    /// Due events not held by a dispatcher.
    pub async fn due_count(&self) -> usize {
        let now = Utc::now();
        self.events
            .read()
            .await
            .values()
            .filter(|(e, leased)| !leased && e.run_at <= now)
            .count()
    }

    pub fn take_calls(&self) -> u64 {
        self.take_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl WorkflowQueue for MockWorkflowQueue {
    async fn enqueue_delayed(&self, event: WorkflowEvent) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        if matches!(events.get(&event.id), Some((_, false))) {
            return Err(DomainError::conflict(event.id));
        }
        events.insert(event.id.clone(), (event, false));
        Ok(())
    }

    async fn take_due(
        &self,
        now: DateTime<Utc>,
        limit: u32,
        _lease: Duration,
    ) -> Result<Vec<WorkflowEvent>, DomainError> {
        self.take_calls.fetch_add(1, Ordering::Relaxed);
        let mut events = self.events.write().await;
        Ok(events
            .values_mut()
            .filter(|(e, leased)| !*leased && e.run_at <= now)
            .take(limit as usize)
            .map(|(e, leased)| {
                *leased = true;
                e.clone()
            })
            .collect())
    }

    async fn complete(&self, event: &WorkflowEvent) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        if matches!(events.get(&event.id), Some((stored, true)) if stored.run_at == event.run_at) {
            events.remove(&event.id);
        }
        Ok(())
    }
}

// ============================================================================
// Mock DebounceLedger / ClaimStore
// ============================================================================

pub struct MockLedger {
    keys: Arc<RwLock<HashSet<String>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl DebounceLedger for MockLedger {
    async fn claim(&self, key: &str) -> bool {
        self.keys.write().await.insert(key.to_string())
    }

    async fn forget(&self, key: &str) {
        self.keys.write().await.remove(key);
    }

    async fn len(&self) -> usize {
        self.keys.read().await.len()
    }
}

pub struct MockClaimStore {
    claims: Arc<RwLock<HashMap<String, Instant>>>,
    purge_calls: Arc<AtomicU64>,
}

impl MockClaimStore {
    pub fn new() -> Self {
        Self {
            claims: Arc::new(RwLock::new(HashMap::new())),
            purge_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn insert_expired(&self, key: &str) {
        self.claims.write().await.insert(key.to_string(), Instant::now());
    }

    pub async fn count(&self) -> usize {
        self.claims.read().await.len()
    }

    pub fn purge_calls(&self) -> u64 {
        self.purge_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ClaimStore for MockClaimStore {
    async fn acquire(&self, key: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut claims = self.claims.write().await;
        let now = Instant::now();
        if claims.get(key).is_some_and(|until| *until > now) {
            return Err(DomainError::conflict(key));
        }
        claims.insert(key.to_string(), now + ttl);
        Ok(())
    }

    async fn release(&self, key: &str) -> Result<(), DomainError> {
        self.claims.write().await.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        self.purge_calls.fetch_add(1, Ordering::Relaxed);
        let mut claims = self.claims.write().await;
        let before = claims.len();
        let now = Instant::now();
        claims.retain(|_, until| *until > now);
        Ok((before - claims.len()) as u64)
    }
}
