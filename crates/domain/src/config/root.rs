use super::{
    ConfigError, DatabaseConfig, LoggingConfig, LookupConfig, RevalidationConfig, ServerConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "./domainstack.toml";
const CRON_SECRET_ENV: &str = "CRON_SECRET";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub revalidation: RevalidationConfig,

    #[serde(default)]
    pub lookup: LookupConfig,

    /// Bearer secret for the cron endpoint, read from `CRON_SECRET`.
    #[serde(skip)]
    pub cron_secret: Option<String>,
}

/// Values passed on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads the config file (explicit path, else `./domainstack.toml` when it
    /// exists, else defaults), then applies the environment and CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };

        config.cron_secret = std::env::var(CRON_SECRET_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.database_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.revalidation;

        if !VALID_LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got '{}'",
                VALID_LOG_LEVELS, self.logging.level
            )));
        }
        if r.access_debounce_secs == 0 {
            return Err(ConfigError::Validation(
                "revalidation.access_debounce_secs must be greater than 0".to_string(),
            ));
        }
        if r.ledger_target >= r.ledger_high_water || r.ledger_high_water > r.ledger_capacity {
            return Err(ConfigError::Validation(format!(
                "ledger sizes must satisfy target < high_water <= capacity (got {} / {} / {})",
                r.ledger_target, r.ledger_high_water, r.ledger_capacity
            )));
        }
        if r.batch_size == 0 {
            return Err(ConfigError::Validation(
                "revalidation.batch_size must be greater than 0".to_string(),
            ));
        }
        if r.lookback_hours == 0 {
            return Err(ConfigError::Validation(
                "revalidation.lookback_hours must be greater than 0".to_string(),
            ));
        }
        if r.dispatch_batch == 0 || r.dispatch_interval_secs == 0 || r.dispatch_lease_secs == 0 {
            return Err(ConfigError::Validation(
                "revalidation.dispatch_batch, dispatch_interval_secs and dispatch_lease_secs must be greater than 0"
                    .to_string(),
            ));
        }
        if self.lookup.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "lookup.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
