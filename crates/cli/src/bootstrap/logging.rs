use domainstack_domain::{Config, LogFormat};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. sqlx statement logging is held at
/// warn so request traffic does not drown the revalidation events.
fn default_directives(level: &str) -> String {
    format!("{},sqlx=warn", level.to_ascii_lowercase())
}

pub fn init_logging(config: &Config) {
    let from_env = std::env::var("RUST_LOG").is_ok_and(|v| !v.trim().is_empty());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_ansi(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }

    info!(
        level = %config.logging.level,
        format = ?config.logging.format,
        rust_log = from_env,
        "Logging initialized"
    );
}
