use crate::section::Section;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Last persisted payload for one (domain, section) pair.
///
/// A record with `failure` set marks the section as permanently unavailable
/// until `expires_at`; its payload is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSection {
    pub domain: String,
    pub section: Section,
    pub payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<PermanentFailure>,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedSection {
    pub fn unavailable(
        domain: &str,
        section: Section,
        failure: PermanentFailure,
        fetched_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            domain: domain.to_string(),
            section,
            payload: serde_json::Value::Null,
            failure: Some(failure),
            fetched_at,
            expires_at,
        }
    }

    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// A lookup failure that will not go away by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum PermanentFailure {
    UnsupportedTld,
    NotRegistered,
    NotHtml,
    Other(String),
}

impl PermanentFailure {
    pub fn from_code(code: &str) -> Self {
        match code {
            "unsupported_tld" => PermanentFailure::UnsupportedTld,
            "not_registered" => PermanentFailure::NotRegistered,
            "not_html" => PermanentFailure::NotHtml,
            other => PermanentFailure::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PermanentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermanentFailure::UnsupportedTld => f.write_str("unsupported TLD"),
            PermanentFailure::NotRegistered => f.write_str("domain is not registered"),
            PermanentFailure::NotHtml => f.write_str("content is not HTML"),
            PermanentFailure::Other(reason) => f.write_str(reason),
        }
    }
}

/// Result of asking an external lookup collaborator for fresh section data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fresh(serde_json::Value),
    Permanent(PermanentFailure),
    /// Transient failure (timeout, rate limit, upstream error).
    Retry(String),
}

/// What a fetch-and-persist operation hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SectionResponse {
    Data(CachedSection),
    Unavailable {
        section: Section,
        failure: PermanentFailure,
    },
}
