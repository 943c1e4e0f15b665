use domainstack_application::use_cases::ProcessDueRevalidationsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Push model: drains due revalidation events on a fixed interval.
pub struct RevalidationDispatchJob {
    dispatch: Arc<ProcessDueRevalidationsUseCase>,
    batch: u32,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl RevalidationDispatchJob {
    pub fn new(dispatch: Arc<ProcessDueRevalidationsUseCase>, batch: u32) -> Self {
        Self {
            dispatch,
            batch: batch.max(1),
            interval_secs: 30,
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
        info!(
            interval_secs = self.interval_secs,
            batch = self.batch,
            "Starting revalidation dispatch job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("RevalidationDispatchJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.run_once().await;
                    }
                }
            }
        });
    }

    /// Drains due events until a pass comes back smaller than the batch.
    pub async fn run_once(&self) {
        loop {
            match self.dispatch.execute(self.batch).await {
                Ok(summary) if summary.events as u32 >= self.batch => {
                    debug!(events = summary.events, "Full batch dispatched, continuing");
                    if self.shutdown.is_cancelled() {
                        break;
                    }
                }
                Ok(_) => break,
                Err(e) => {
                    error!(error = %e, "Revalidation dispatch failed");
                    break;
                }
            }
        }
    }
}
