#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use domainstack_application::ports::{
    ClaimStore, DebounceLedger, DomainRepository, SectionCacheRepository, SectionFetcher,
    WorkflowEvent, WorkflowQueue,
};
use domainstack_domain::{
    CachedSection, Domain, DomainError, DomainName, FetchOutcome, PermanentFailure, Section,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

// ============================================================================
// Mock DomainRepository
// ============================================================================

pub struct MockDomainRepository {
    last_accessed: Arc<RwLock<HashMap<String, Option<DateTime<Utc>>>>>,
    access_writes: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
    failing_domains: Arc<RwLock<Vec<String>>>,
}

impl MockDomainRepository {
    pub fn new() -> Self {
        Self {
            last_accessed: Arc::new(RwLock::new(HashMap::new())),
            access_writes: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
            failing_domains: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Adds a domain last viewed `days` days ago.
    pub async fn add_accessed(&self, domain: &str, days: i64) {
        self.last_accessed
            .write()
            .await
            .insert(domain.to_string(), Some(Utc::now() - ChronoDuration::days(days)));
    }

    pub async fn add_never_accessed(&self, domain: &str) {
        self.last_accessed
            .write()
            .await
            .insert(domain.to_string(), None);
    }

    pub async fn last_accessed(&self, domain: &str) -> Option<DateTime<Utc>> {
        self.last_accessed
            .read()
            .await
            .get(domain)
            .cloned()
            .flatten()
    }

    pub fn access_writes(&self) -> u64 {
        self.access_writes.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub async fn fail_for(&self, domain: &str) {
        self.failing_domains.write().await.push(domain.to_string());
    }

    async fn check(&self, domain: &str) -> Result<(), DomainError> {
        if *self.should_fail.read().await
            || self.failing_domains.read().await.iter().any(|d| d == domain)
        {
            return Err(DomainError::DatabaseError("database unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DomainRepository for MockDomainRepository {
    async fn ensure(&self, name: &DomainName) -> Result<Domain, DomainError> {
        self.check(name.as_str()).await?;
        let mut map = self.last_accessed.write().await;
        let last = *map.entry(name.to_string()).or_insert(None);
        let mut domain = Domain::new(name.clone());
        domain.last_accessed_at = last;
        Ok(domain)
    }

    async fn update_last_accessed(
        &self,
        name: &DomainName,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.check(name.as_str()).await?;
        self.access_writes.fetch_add(1, Ordering::Relaxed);
        self.last_accessed
            .write()
            .await
            .insert(name.to_string(), Some(at));
        Ok(())
    }

    async fn get_last_accessed(&self, name: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
        self.check(name).await?;
        Ok(self.last_accessed(name).await)
    }

    async fn list_recently_accessed(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<String>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError("database unavailable".to_string()));
        }
        let map = self.last_accessed.read().await;
        let mut recent: Vec<(String, DateTime<Utc>)> = map
            .iter()
            .filter_map(|(d, at)| at.filter(|at| *at >= since).map(|at| (d.clone(), at)))
            .collect();
        recent.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(recent
            .into_iter()
            .take(limit as usize)
            .map(|(d, _)| d)
            .collect())
    }
}

// ============================================================================
// Mock SectionCacheRepository
// ============================================================================

pub struct MockSectionCache {
    records: Arc<RwLock<HashMap<(String, Section), CachedSection>>>,
    upserts: Arc<AtomicU64>,
}

impl MockSectionCache {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            upserts: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Seeds a record expiring `expires_in_secs` from now (negative = stale).
    pub async fn seed(&self, domain: &str, section: Section, expires_in_secs: i64) {
        let now = Utc::now();
        self.records.write().await.insert(
            (domain.to_string(), section),
            CachedSection {
                domain: domain.to_string(),
                section,
                payload: serde_json::json!({ "seeded": true }),
                failure: None,
                fetched_at: now - ChronoDuration::hours(1),
                expires_at: now + ChronoDuration::seconds(expires_in_secs),
            },
        );
    }

    /// Seeds a permanent-failure marker expiring `expires_in_secs` from now.
    pub async fn seed_unavailable(
        &self,
        domain: &str,
        section: Section,
        failure: PermanentFailure,
        expires_in_secs: i64,
    ) {
        let now = Utc::now();
        self.records.write().await.insert(
            (domain.to_string(), section),
            CachedSection::unavailable(
                domain,
                section,
                failure,
                now - ChronoDuration::hours(1),
                now + ChronoDuration::seconds(expires_in_secs),
            ),
        );
    }

    /// Seeds a fresh record for every section.
    pub async fn seed_all_fresh(&self, domain: &str) {
        for section in Section::ALL {
            self.seed(domain, section, 3600).await;
        }
    }

    pub async fn get(&self, domain: &str, section: Section) -> Option<CachedSection> {
        self.records
            .read()
            .await
            .get(&(domain.to_string(), section))
            .cloned()
    }

    pub fn upserts(&self) -> u64 {
        self.upserts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SectionCacheRepository for MockSectionCache {
    async fn get_cached_section(
        &self,
        section: Section,
        domain: &str,
    ) -> Result<Option<CachedSection>, DomainError> {
        Ok(self.get(domain, section).await)
    }

    async fn upsert_section_record(&self, record: &CachedSection) -> Result<(), DomainError> {
        self.upserts.fetch_add(1, Ordering::Relaxed);
        self.records
            .write()
            .await
            .insert((record.domain.clone(), record.section), record.clone());
        Ok(())
    }
}

// ============================================================================
// Mock SectionFetcher
// ============================================================================

pub struct MockFetcher {
    outcomes: Arc<RwLock<HashMap<Section, FetchOutcome>>>,
    call_count: Arc<AtomicU64>,
    delay: Duration,
}

impl MockFetcher {
    /// Every section returns a small fresh payload.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(RwLock::new(HashMap::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn set_outcome(&self, section: Section, outcome: FetchOutcome) {
        self.outcomes.write().await.insert(section, outcome);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SectionFetcher for MockFetcher {
    async fn fetch(&self, section: Section, domain: &str) -> FetchOutcome {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcomes
            .read()
            .await
            .get(&section)
            .cloned()
            .unwrap_or_else(|| {
                FetchOutcome::Fresh(serde_json::json!({ "domain": domain, "section": section }))
            })
    }
}

// ============================================================================
// Mock WorkflowQueue
// ============================================================================

pub struct MockWorkflowQueue {
    /// Event plus the time its lease lapses, when leased.
    events: Arc<RwLock<HashMap<String, (WorkflowEvent, Option<DateTime<Utc>>)>>>,
    enqueue_calls: Arc<AtomicU64>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockWorkflowQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            enqueue_calls: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn pending(&self) -> Vec<WorkflowEvent> {
        self.events
            .read()
            .await
            .values()
            .map(|(e, _)| e.clone())
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<WorkflowEvent> {
        self.events.read().await.get(id).map(|(e, _)| e.clone())
    }

    pub async fn is_leased(&self, id: &str) -> bool {
        self.events
            .read()
            .await
            .get(id)
            .is_some_and(|(_, lease)| lease.is_some())
    }

    pub async fn insert(&self, event: WorkflowEvent) {
        self.events
            .write()
            .await
            .insert(event.id.clone(), (event, None));
    }

    pub fn enqueue_calls(&self) -> u64 {
        self.enqueue_calls.load(Ordering::Relaxed)
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl WorkflowQueue for MockWorkflowQueue {
    async fn enqueue_delayed(&self, event: WorkflowEvent) -> Result<(), DomainError> {
        self.enqueue_calls.fetch_add(1, Ordering::Relaxed);
        if *self.should_fail.read().await {
            return Err(DomainError::Workflow("queue unavailable".to_string()));
        }
        let mut events = self.events.write().await;
        if matches!(events.get(&event.id), Some((_, None))) {
            return Err(DomainError::conflict(event.id));
        }
        events.insert(event.id.clone(), (event, None));
        Ok(())
    }

    async fn take_due(
        &self,
        now: DateTime<Utc>,
        limit: u32,
        lease: Duration,
    ) -> Result<Vec<WorkflowEvent>, DomainError> {
        let locked_until = now + ChronoDuration::from_std(lease).unwrap_or(ChronoDuration::days(1));
        let mut events = self.events.write().await;
        let mut due: Vec<WorkflowEvent> = Vec::new();
        for (event, leased) in events.values_mut() {
            if due.len() >= limit as usize {
                break;
            }
            if event.run_at <= now && leased.map_or(true, |until| until <= now) {
                *leased = Some(locked_until);
                due.push(event.clone());
            }
        }
        due.sort_by_key(|e| e.run_at);
        Ok(due)
    }

    async fn complete(&self, event: &WorkflowEvent) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        if matches!(events.get(&event.id), Some((stored, Some(_))) if stored.run_at == event.run_at)
        {
            events.remove(&event.id);
        }
        Ok(())
    }
}

// ============================================================================
// Mock DebounceLedger / ClaimStore
// ============================================================================

pub struct MockLedger {
    entries: Arc<RwLock<HashMap<String, Instant>>>,
    window: Duration,
}

impl MockLedger {
    pub fn new(window: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            window,
        }
    }
}

#[async_trait]
impl DebounceLedger for MockLedger {
    async fn claim(&self, key: &str) -> bool {
        let mut entries = self.entries.write().await;
        if let Some(at) = entries.get(key) {
            if at.elapsed() < self.window {
                return false;
            }
        }
        entries.insert(key.to_string(), Instant::now());
        true
    }

    async fn forget(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

pub struct MockClaimStore {
    claims: Arc<RwLock<HashMap<String, Instant>>>,
    releases: Arc<AtomicU64>,
}

impl MockClaimStore {
    pub fn new() -> Self {
        Self {
            claims: Arc::new(RwLock::new(HashMap::new())),
            releases: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn is_held(&self, key: &str) -> bool {
        self.claims
            .read()
            .await
            .get(key)
            .is_some_and(|until| *until > Instant::now())
    }

    pub fn releases(&self) -> u64 {
        self.releases.load(Ordering::Relaxed)
    }

    /// Lets every held claim lapse, as happens between hourly sweeps.
    pub async fn expire_all(&self) {
        self.claims.write().await.clear();
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
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.claims.write().await.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let mut claims = self.claims.write().await;
        let before = claims.len();
        let now = Instant::now();
        claims.retain(|_, until| *until > now);
        Ok((before - claims.len()) as u64)
    }
}
