use crate::{ClaimPurgeJob, RevalidationDispatchJob, WarmCacheJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Register jobs with the builder methods, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_dispatch(RevalidationDispatchJob::new(dispatch, 100))
///     .with_claim_purge(ClaimPurgeJob::new(claims))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    dispatch: Option<RevalidationDispatchJob>,
    warm_cache: Option<WarmCacheJob>,
    claim_purge: Option<ClaimPurgeJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            dispatch: None,
            warm_cache: None,
            claim_purge: None,
        }
    }

    pub fn with_dispatch(mut self, job: RevalidationDispatchJob) -> Self {
        self.dispatch = Some(job);
        self
    }

    pub fn with_warm_cache(mut self, job: WarmCacheJob) -> Self {
        self.warm_cache = Some(job);
        self
    }

    pub fn with_claim_purge(mut self, job: ClaimPurgeJob) -> Self {
        self.claim_purge = Some(job);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.dispatch.is_none() && self.warm_cache.is_none() && self.claim_purge.is_none()
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.dispatch {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.warm_cache {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.claim_purge {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
