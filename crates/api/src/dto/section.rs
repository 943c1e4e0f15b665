use chrono::{DateTime, Utc};
use domainstack_domain::{CachedSection, PermanentFailure, Section};
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SectionDataResponse {
    pub domain: String,
    pub section: Section,
    pub data: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Served past `expires_at` because a refresh could not complete.
    pub stale: bool,
    pub refreshing: bool,
}

impl SectionDataResponse {
    pub fn from_record(record: CachedSection, stale: bool, refreshing: bool) -> Self {
        Self {
            domain: record.domain,
            section: record.section,
            data: record.payload,
            fetched_at: record.fetched_at,
            expires_at: record.expires_at,
            stale,
            refreshing,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SectionUnavailableResponse {
    pub domain: String,
    pub section: Section,
    pub reason: PermanentFailure,
    pub message: String,
}
