//! Domainstack Application Layer
//!
//! Ports describe the persistence, execution and lookup collaborators; use
//! cases implement access recording, decay-aware scheduling and the
//! deduplicated fetch-and-persist flow on top of them.
pub mod ports;
pub mod services;
pub mod use_cases;
