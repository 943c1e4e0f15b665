use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How future refreshes are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevalidationMode {
    /// Durable delayed events with an exact wake time per domain/section.
    #[default]
    Push,
    /// Periodic sweep over recently accessed domains.
    Pull,
}

/// Revalidation scheduling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevalidationConfig {
    #[serde(default)]
    pub mode: RevalidationMode,

    /// Access Recorder debounce window (default: 300s)
    #[serde(default = "default_access_debounce_secs")]
    pub access_debounce_secs: u64,

    /// Window during which a domain/section is not scheduled twice (default: 60s)
    #[serde(default = "default_schedule_dedup_secs")]
    pub schedule_dedup_secs: u64,

    /// Ledger size that triggers pruning of expired entries
    #[serde(default = "default_ledger_high_water")]
    pub ledger_high_water: usize,

    /// Size pruning tries to bring the ledger back down to
    #[serde(default = "default_ledger_target")]
    pub ledger_target: usize,

    /// Hard bound; least recently claimed entries are evicted beyond it
    #[serde(default = "default_ledger_capacity")]
    pub ledger_capacity: usize,

    /// Lifetime of a fetch claim held by the deduplication guard (default: 300s)
    #[serde(default = "default_claim_ttl_secs")]
    pub claim_ttl_secs: u64,

    /// Keep fetch claims in the database so several processes share them
    /// (default: true). `false` keeps them in memory for single-process setups.
    #[serde(default = "default_shared_claims")]
    pub shared_claims: bool,

    /// How often expired claims are purged (default: 3600s)
    #[serde(default = "default_claim_purge_interval_secs")]
    pub claim_purge_interval_secs: u64,

    /// Pull sweep: how far back to look for accessed domains (default: 24h)
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,

    /// Pull sweep: domains processed concurrently per batch (default: 10)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pull sweep: max domains listed per run (default: 1000)
    #[serde(default = "default_sweep_limit")]
    pub sweep_limit: u32,

    /// Push dispatcher poll interval (default: 30s)
    #[serde(default = "default_dispatch_interval_secs")]
    pub dispatch_interval_secs: u64,

    /// Push dispatcher: max due events taken per poll (default: 100)
    #[serde(default = "default_dispatch_batch")]
    pub dispatch_batch: u32,

    /// Push dispatcher: how long a taken event stays hidden before another
    /// dispatcher may retry it (default: 300s)
    #[serde(default = "default_dispatch_lease_secs")]
    pub dispatch_lease_secs: u64,

    /// Runs the pull sweep in-process every N seconds; 0 leaves it to the cron endpoint
    #[serde(default)]
    pub sweep_interval_secs: u64,
}

impl RevalidationConfig {
    pub fn access_debounce(&self) -> Duration {
        Duration::from_secs(self.access_debounce_secs)
    }

    pub fn schedule_dedup(&self) -> Duration {
        Duration::from_secs(self.schedule_dedup_secs)
    }

    pub fn claim_ttl(&self) -> Duration {
        Duration::from_secs(self.claim_ttl_secs)
    }

    pub fn dispatch_lease(&self) -> Duration {
        Duration::from_secs(self.dispatch_lease_secs)
    }
}

impl Default for RevalidationConfig {
    fn default() -> Self {
        Self {
            mode: RevalidationMode::default(),
            access_debounce_secs: default_access_debounce_secs(),
            schedule_dedup_secs: default_schedule_dedup_secs(),
            ledger_high_water: default_ledger_high_water(),
            ledger_target: default_ledger_target(),
            ledger_capacity: default_ledger_capacity(),
            claim_ttl_secs: default_claim_ttl_secs(),
            shared_claims: default_shared_claims(),
            claim_purge_interval_secs: default_claim_purge_interval_secs(),
            lookback_hours: default_lookback_hours(),
            batch_size: default_batch_size(),
            sweep_limit: default_sweep_limit(),
            dispatch_interval_secs: default_dispatch_interval_secs(),
            dispatch_batch: default_dispatch_batch(),
            dispatch_lease_secs: default_dispatch_lease_secs(),
            sweep_interval_secs: 0,
        }
    }
}

fn default_access_debounce_secs() -> u64 {
    300
}

fn default_schedule_dedup_secs() -> u64 {
    60
}

fn default_ledger_high_water() -> usize {
    10_000
}

fn default_ledger_target() -> usize {
    8_000
}

fn default_ledger_capacity() -> usize {
    50_000
}

fn default_claim_ttl_secs() -> u64 {
    300
}

fn default_shared_claims() -> bool {
    true
}

fn default_claim_purge_interval_secs() -> u64 {
    3600
}

fn default_lookback_hours() -> u32 {
    24
}

fn default_batch_size() -> usize {
    10
}

fn default_sweep_limit() -> u32 {
    1000
}

fn default_dispatch_interval_secs() -> u64 {
    30
}

fn default_dispatch_batch() -> u32 {
    100
}

fn default_dispatch_lease_secs() -> u64 {
    300
}
