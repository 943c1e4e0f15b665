use domainstack_application::use_cases::WarmCacheUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Pull model: periodic warm-cache sweep in-process, as an alternative to an
/// external cron calling the HTTP trigger.
pub struct WarmCacheJob {
    warm_cache: Arc<WarmCacheUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl WarmCacheJob {
    pub fn new(warm_cache: Arc<WarmCacheUseCase>) -> Self {
        Self {
            warm_cache,
            interval_secs: 3600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting warm-cache job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // The first tick fires immediately; skip it so startup stays quiet.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("WarmCacheJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.warm_cache.execute().await {
                            error!(error = %e, "Warm-cache sweep failed");
                        }
                    }
                }
            }
        });
    }
}
