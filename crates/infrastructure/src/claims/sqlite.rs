use crate::database::{db_error, to_millis};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use domainstack_application::ports::ClaimStore;
use domainstack_domain::DomainError;
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::instrument;

/// Claims shared by every process using the same database file.
pub struct SqliteClaimStore {
    pool: SqlitePool,
}

impl SqliteClaimStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClaimStore for SqliteClaimStore {
    #[instrument(skip(self))]
    async fn acquire(&self, key: &str, ttl: Duration) -> Result<(), DomainError> {
        let now = Utc::now();
        let ttl = ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::days(1));

        // Insert, or take over a claim whose holder let it expire. A live
        // claim makes the WHERE fail and nothing is written.
        let result = sqlx::query(
            "INSERT INTO revalidation_claims (key, expires_at) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET expires_at = excluded.expires_at
             WHERE revalidation_claims.expires_at <= ?",
        )
        .bind(key)
        .bind(to_millis(now + ttl))
        .bind(to_millis(now))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to acquire claim"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::conflict(key));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn release(&self, key: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM revalidation_claims WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to release claim"))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM revalidation_claims WHERE expires_at <= ?")
            .bind(to_millis(Utc::now()))
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to purge expired claims"))?;
        Ok(result.rows_affected())
    }
}
