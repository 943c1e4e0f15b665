//! # Domainstack
//!
//! Domain intelligence cache with inactivity-decayed revalidation.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use domainstack_api::AppState;
use domainstack_domain::CliOverrides;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "domainstack")]
#[command(version)]
#[command(about = "Domain report cache with decaying background revalidation")]
struct Cli {
    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Web server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// SQLite database path
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        web_port: cli.port,
        bind_address: cli.bind,
        database_path: cli.database,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Domainstack");
    bootstrap::log_config_summary(cli.config.as_deref(), &config);

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool, &config)?;
    let use_cases = di::UseCases::new(&repos, &config);

    let shutdown = CancellationToken::new();
    di::build_jobs(&repos, &use_cases, &config, shutdown.clone())
        .start()
        .await;

    let state = AppState {
        get_section: use_cases.get_section.clone(),
        record_access: use_cases.record_access.clone(),
        warm_cache: use_cases.warm_cache.clone(),
        mode: config.revalidation.mode,
        cron_secret: config.cron_secret.as_deref().map(Arc::from),
    };

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.web_port);
    server::start_web_server(&bind_addr, state, shutdown).await?;

    info!("Domainstack stopped");
    Ok(())
}
