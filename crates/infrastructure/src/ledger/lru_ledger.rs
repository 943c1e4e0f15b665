use async_trait::async_trait;
use compact_str::CompactString;
use domainstack_application::ports::DebounceLedger;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

/// In-process debounce ledger.
///
/// Entries are only touched on a successful claim, so the LRU tail is always
/// the oldest attempt. Once the ledger grows past `high_water`, expired
/// entries are popped from the tail until it is back at `target`. `capacity`
/// is a hard bound; the LRU evicts the oldest entry beyond it, which at worst
/// lets one redundant write through.
pub struct LruDebounceLedger {
    entries: Mutex<LruCache<CompactString, Instant>>,
    window: Duration,
    high_water: usize,
    target: usize,
}

impl LruDebounceLedger {
    pub fn new(window: Duration, high_water: usize, target: usize, capacity: usize) -> Self {
        let capacity =
            NonZeroUsize::new(capacity.max(high_water)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            window,
            high_water,
            target: target.min(high_water),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CompactString, Instant>> {
        // A panic while holding the lock cannot leave the map inconsistent.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of entries evicted.
    fn prune(&self, entries: &mut LruCache<CompactString, Instant>) -> usize {
        if entries.len() <= self.high_water {
            return 0;
        }

        let before = entries.len();
        while entries.len() > self.target {
            match entries.peek_lru() {
                Some((_, at)) if at.elapsed() >= self.window => {
                    entries.pop_lru();
                }
                _ => break,
            }
        }

        let pruned = before - entries.len();
        if pruned > 0 {
            debug!(pruned, remaining = entries.len(), "Debounce ledger pruned");
        }
        pruned
    }
}

#[async_trait]
impl DebounceLedger for LruDebounceLedger {
    async fn claim(&self, key: &str) -> bool {
        let mut entries = self.lock();

        if let Some(at) = entries.peek(key) {
            if at.elapsed() < self.window {
                return false;
            }
        }

        entries.put(CompactString::new(key), Instant::now());
        self.prune(&mut entries);
        true
    }

    async fn forget(&self, key: &str) {
        self.lock().pop(key);
    }

    async fn len(&self) -> usize {
        self.lock().len()
    }
}
