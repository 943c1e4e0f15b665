//! Inactivity-based decay of refresh cadence.
//!
//! Every section has a base TTL. The longer a domain goes without a human
//! viewing it, the more that TTL is stretched, and past a cutoff the domain
//! stops being refreshed at all. All functions here are pure; the `*_at`
//! variants take `now` explicitly.

use crate::section::Section;
use chrono::{DateTime, Utc};
use std::time::Duration;

const MS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayTier {
    /// Inactivity threshold in days at which this tier starts to apply.
    pub days: f64,
    pub multiplier: f64,
}

/// Tiers for sections with a base TTL of six hours or less, ascending by days.
pub const FAST_DECAY_TIERS: [DecayTier; 4] = [
    DecayTier { days: 0.0, multiplier: 1.0 },
    DecayTier { days: 3.0, multiplier: 3.0 },
    DecayTier { days: 14.0, multiplier: 10.0 },
    DecayTier { days: 60.0, multiplier: 30.0 },
];

/// Tiers for sections with a base TTL above six hours, ascending by days.
pub const SLOW_DECAY_TIERS: [DecayTier; 4] = [
    DecayTier { days: 0.0, multiplier: 1.0 },
    DecayTier { days: 3.0, multiplier: 5.0 },
    DecayTier { days: 14.0, multiplier: 20.0 },
    DecayTier { days: 60.0, multiplier: 50.0 },
];

pub const FAST_STOP_AFTER_DAYS: f64 = 180.0;
pub const SLOW_STOP_AFTER_DAYS: f64 = 90.0;

pub fn is_fast_changing(section: Section) -> bool {
    section.is_fast_changing()
}

pub fn decay_tiers(section: Section) -> &'static [DecayTier] {
    if is_fast_changing(section) {
        &FAST_DECAY_TIERS
    } else {
        &SLOW_DECAY_TIERS
    }
}

/// Fractional days between `last_accessed` and `now`.
///
/// `None` when the domain was never viewed or the timestamp lies in the future
/// (clock skew); both cases mean "no decay".
fn inactive_days(last_accessed: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<f64> {
    let last = last_accessed?;
    let elapsed_ms = now.signed_duration_since(last).num_milliseconds();
    if elapsed_ms < 0 {
        return None;
    }
    Some(elapsed_ms as f64 / MS_PER_DAY)
}

pub fn decay_multiplier(section: Section, last_accessed: Option<DateTime<Utc>>) -> f64 {
    decay_multiplier_at(section, last_accessed, Utc::now())
}

pub fn decay_multiplier_at(
    section: Section,
    last_accessed: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f64 {
    let Some(days) = inactive_days(last_accessed, now) else {
        return 1.0;
    };

    decay_tiers(section)
        .iter()
        .rev()
        .find(|tier| days >= tier.days)
        .map(|tier| tier.multiplier)
        .unwrap_or(1.0)
}

pub fn should_stop_revalidation(section: Section, last_accessed: Option<DateTime<Utc>>) -> bool {
    should_stop_revalidation_at(section, last_accessed, Utc::now())
}

pub fn should_stop_revalidation_at(
    section: Section,
    last_accessed: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    let Some(days) = inactive_days(last_accessed, now) else {
        return false;
    };

    let cutoff = if is_fast_changing(section) {
        FAST_STOP_AFTER_DAYS
    } else {
        SLOW_STOP_AFTER_DAYS
    };
    days > cutoff
}

/// Scales `base_ttl_ms` by `multiplier`.
///
/// Non-finite or non-positive inputs leave the base TTL untouched so a bad
/// multiplier can never yield a zero, negative or NaN TTL.
pub fn apply_decay_to_ttl(base_ttl_ms: f64, multiplier: f64) -> f64 {
    if !base_ttl_ms.is_finite() || base_ttl_ms <= 0.0 {
        return base_ttl_ms;
    }
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return base_ttl_ms;
    }
    base_ttl_ms * multiplier
}

/// Section base TTL stretched by the current decay multiplier.
pub fn decayed_ttl(section: Section, last_accessed: Option<DateTime<Utc>>) -> Duration {
    decayed_ttl_at(section, last_accessed, Utc::now())
}

pub fn decayed_ttl_at(
    section: Section,
    last_accessed: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Duration {
    let base_ms = section.base_ttl().as_millis() as f64;
    let multiplier = decay_multiplier_at(section, last_accessed, now);
    Duration::from_millis(apply_decay_to_ttl(base_ms, multiplier) as u64)
}
