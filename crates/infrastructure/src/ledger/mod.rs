pub mod lru_ledger;

pub use lru_ledger::LruDebounceLedger;
