use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const HOUR: u64 = 3600;

/// Sections whose base TTL is at or below this threshold use the fast-changing
/// decay tiers.
pub const FAST_CHANGING_MAX_TTL: Duration = Duration::from_secs(6 * HOUR);

/// Data category cached per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dns,
    Headers,
    Hosting,
    Certificates,
    Seo,
    Registration,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dns,
        Section::Headers,
        Section::Hosting,
        Section::Certificates,
        Section::Seo,
        Section::Registration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Dns => "dns",
            Section::Headers => "headers",
            Section::Hosting => "hosting",
            Section::Certificates => "certificates",
            Section::Seo => "seo",
            Section::Registration => "registration",
        }
    }

    /// How long freshly fetched data for this section is considered current
    /// for a domain that is actively being viewed.
    pub fn base_ttl(&self) -> Duration {
        let secs = match self {
            Section::Dns => HOUR,
            Section::Headers => 6 * HOUR,
            Section::Certificates => 6 * HOUR,
            Section::Hosting => 24 * HOUR,
            Section::Seo => 24 * HOUR,
            Section::Registration => 24 * HOUR,
        };
        Duration::from_secs(secs)
    }

    pub fn is_fast_changing(&self) -> bool {
        self.base_ttl() <= FAST_CHANGING_MAX_TTL
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dns" => Ok(Section::Dns),
            "headers" => Ok(Section::Headers),
            "hosting" => Ok(Section::Hosting),
            "certificates" => Ok(Section::Certificates),
            "seo" => Ok(Section::Seo),
            "registration" => Ok(Section::Registration),
            other => Err(DomainError::InvalidSection(other.to_string())),
        }
    }
}
