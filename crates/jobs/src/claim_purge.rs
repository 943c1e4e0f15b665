use domainstack_application::ports::ClaimStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct ClaimPurgeJob {
    claims: Arc<dyn ClaimStore>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ClaimPurgeJob {
    pub fn new(claims: Arc<dyn ClaimStore>) -> Self {
        Self {
            claims,
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
        info!(interval_secs = self.interval_secs, "Starting claim purge job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ClaimPurgeJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.claims.purge_expired().await {
                            Ok(0) => {}
                            Ok(purged) => info!(purged, "Expired claims purged"),
                            Err(e) => error!(error = %e, "Claim purge failed"),
                        }
                    }
                }
            }
        });
    }
}
