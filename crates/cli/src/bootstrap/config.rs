use domainstack_domain::{CliOverrides, Config, RevalidationMode};
use tracing::{info, warn};

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logs the effective configuration. Runs after logging is initialized,
/// which itself depends on the loaded config.
pub fn log_config_summary(config_path: Option<&str>, config: &Config) {
    let r = &config.revalidation;

    info!(
        config_file = config_path.unwrap_or("default"),
        bind = %config.server.bind_address,
        web_port = config.server.web_port,
        database = %config.database.path,
        lookup = %config.lookup.base_url,
        mode = ?r.mode,
        shared_claims = r.shared_claims,
        "Configuration loaded"
    );

    if config.cron_secret.is_none() {
        info!("CRON_SECRET not set, cron endpoints will reject every request");
        if r.mode == RevalidationMode::Pull && r.sweep_interval_secs == 0 {
            warn!(
                "Pull mode without sweep_interval_secs or CRON_SECRET: \
                 sections are refreshed only when users view them"
            );
        }
    }
}
