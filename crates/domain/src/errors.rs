use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid section: {0}")]
    InvalidSection(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Operation timed out")]
    Timeout,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Workflow backend error: {0}")]
    Workflow(String),

    /// Another worker already holds or has completed the work for `key`.
    #[error("Already handled: {key}")]
    Conflict { key: String },
}

impl DomainError {
    pub fn conflict(key: impl Into<String>) -> Self {
        DomainError::Conflict { key: key.into() }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Conflict { .. })
    }
}
