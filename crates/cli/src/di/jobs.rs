use super::{Repositories, UseCases};
use domainstack_domain::{Config, RevalidationMode};
use domainstack_jobs::{ClaimPurgeJob, JobRunner, RevalidationDispatchJob, WarmCacheJob};
use tokio_util::sync::CancellationToken;

/// Registers the background jobs the configured mode needs.
pub fn build_jobs(
    repos: &Repositories,
    use_cases: &UseCases,
    config: &Config,
    shutdown: CancellationToken,
) -> JobRunner {
    let r = &config.revalidation;

    let mut runner = JobRunner::new().with_claim_purge(
        ClaimPurgeJob::new(repos.claims.clone())
            .with_interval(r.claim_purge_interval_secs)
            .with_cancellation(shutdown.clone()),
    );

    if r.mode == RevalidationMode::Push {
        runner = runner.with_dispatch(
            RevalidationDispatchJob::new(use_cases.dispatch.clone(), r.dispatch_batch)
                .with_interval(r.dispatch_interval_secs)
                .with_cancellation(shutdown.clone()),
        );
    }

    if r.sweep_interval_secs > 0 {
        runner = runner.with_warm_cache(
            WarmCacheJob::new(use_cases.warm_cache.clone())
                .with_interval(r.sweep_interval_secs)
                .with_cancellation(shutdown),
        );
    }

    runner
}
