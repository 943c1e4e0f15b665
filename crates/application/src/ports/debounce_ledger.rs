use async_trait::async_trait;

/// Short-lived key -> timestamp bookkeeping used to debounce repeated work.
///
/// Losing entries only causes redundant work, so implementations may be
/// process-local or backed by a shared store.
#[async_trait]
pub trait DebounceLedger: Send + Sync {
    /// Returns `true` and records the attempt when `key` has no live entry;
    /// returns `false` when an entry younger than the window exists.
    async fn claim(&self, key: &str) -> bool;

    /// Drops the entry for `key` so the next claim succeeds.
    async fn forget(&self, key: &str);

    async fn len(&self) -> usize;
}
