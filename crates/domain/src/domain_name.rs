use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A normalized registrable domain name such as `example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(Arc<str>);

impl DomainName {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let normalized = input.trim().trim_end_matches('.').to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "Domain name cannot be empty".to_string(),
            ));
        }
        if normalized.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "Domain name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }

        let labels: Vec<&str> = normalized.split('.').collect();
        if labels.len() < 2 {
            return Err(DomainError::InvalidDomainName(format!(
                "'{normalized}' has no top-level domain"
            )));
        }
        for label in &labels {
            validate_label(label, &normalized)?;
        }

        Ok(Self(Arc::from(normalized.as_str())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tld(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

fn validate_label(label: &str, name: &str) -> Result<(), DomainError> {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{name}' has a label that is empty or longer than {MAX_LABEL_LEN} characters"
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(DomainError::InvalidDomainName(format!(
            "'{name}' has a label starting or ending with '-'"
        )));
    }
    if !label
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(DomainError::InvalidDomainName(format!(
            "'{name}' contains invalid characters"
        )));
    }
    Ok(())
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0.to_string()
    }
}

/// A tracked domain row.
#[derive(Debug, Clone)]
pub struct Domain {
    pub id: Option<i64>,
    pub name: DomainName,
    pub tld: Arc<str>,
    /// Last time a real user viewed this domain. Background work never sets it.
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Domain {
    pub fn new(name: DomainName) -> Self {
        let tld = Arc::from(name.tld());
        Self {
            id: None,
            name,
            tld,
            last_accessed_at: None,
            created_at: None,
        }
    }
}
