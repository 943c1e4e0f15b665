//! Configuration module for Domainstack
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: HTTP binding
//! - `database`: SQLite settings
//! - `logging`: Logging settings
//! - `revalidation`: Scheduling, debounce and sweep tuning
//! - `lookup`: External section lookup service
//! - `errors`: Configuration errors

pub mod database;
pub mod errors;
pub mod logging;
pub mod lookup;
pub mod revalidation;
pub mod root;
pub mod server;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use lookup::LookupConfig;
pub use revalidation::{RevalidationConfig, RevalidationMode};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
