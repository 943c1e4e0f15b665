use crate::ports::{DebounceLedger, RevalidationBackend, RevalidationRequest};
use crate::services::absorb_conflict;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use domainstack_domain::{decay_multiplier_at, decayed_ttl_at, should_stop_revalidation_at};
use domainstack_domain::{DomainError, Section};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled { run_at: DateTime<Utc> },
    /// Inactive past the section's cutoff; nothing is scheduled.
    Stopped,
    /// Already scheduled by this or another worker.
    Deduplicated,
}

/// Arranges the next refresh of a domain/section, stretched by inactivity.
pub struct ScheduleRevalidationUseCase {
    backend: Arc<dyn RevalidationBackend>,
    recently_scheduled: Arc<dyn DebounceLedger>,
}

impl ScheduleRevalidationUseCase {
    pub fn new(
        backend: Arc<dyn RevalidationBackend>,
        recently_scheduled: Arc<dyn DebounceLedger>,
    ) -> Self {
        Self {
            backend,
            recently_scheduled,
        }
    }

    pub fn backend(&self) -> &Arc<dyn RevalidationBackend> {
        &self.backend
    }

    fn ledger_key(domain: &str, section: Section) -> String {
        format!("{domain}:{section}")
    }

    /// Drops the recently-scheduled entry for the pair. Used once the pending
    /// revalidation it stood for has come due.
    pub async fn forget(&self, domain: &str, section: Section) {
        self.recently_scheduled
            .forget(&Self::ledger_key(domain, section))
            .await;
    }

    /// Next refresh time: the decayed base TTL from now, never earlier than
    /// `desired_expiry`.
    pub fn next_run_at(
        section: Section,
        desired_expiry: Option<DateTime<Utc>>,
        last_accessed: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let ttl = decayed_ttl_at(section, last_accessed, now);
        let delay = ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::MAX);
        let decayed = now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC);

        match desired_expiry {
            Some(desired) if desired > decayed => desired,
            _ => decayed,
        }
    }

    #[instrument(skip(self), fields(mode = ?self.backend.mode()))]
    pub async fn execute(
        &self,
        domain: &str,
        section: Section,
        desired_expiry: Option<DateTime<Utc>>,
        last_accessed: Option<DateTime<Utc>>,
    ) -> Result<ScheduleOutcome, DomainError> {
        let now = Utc::now();

        if should_stop_revalidation_at(section, last_accessed, now) {
            info!(
                domain = %domain,
                section = %section,
                last_accessed = ?last_accessed,
                "Domain inactive past cutoff, revalidation stopped"
            );
            return Ok(ScheduleOutcome::Stopped);
        }

        let run_at = Self::next_run_at(section, desired_expiry, last_accessed, now);

        let key = Self::ledger_key(domain, section);
        if !self.recently_scheduled.claim(&key).await {
            debug!(key = %key, "Revalidation already scheduled recently");
            return Ok(ScheduleOutcome::Deduplicated);
        }

        let request = RevalidationRequest {
            domain: domain.to_string(),
            section,
            run_at,
        };

        match absorb_conflict(self.backend.schedule(request).await) {
            Ok(Some(())) => {
                debug!(
                    key = %key,
                    run_at = %run_at,
                    multiplier = decay_multiplier_at(section, last_accessed, now),
                    "Revalidation scheduled"
                );
                Ok(ScheduleOutcome::Scheduled { run_at })
            }
            Ok(None) => Ok(ScheduleOutcome::Deduplicated),
            Err(e) => {
                self.recently_scheduled.forget(&key).await;
                Err(e)
            }
        }
    }
}
