use crate::database::{db_error, from_millis, to_millis};
use async_trait::async_trait;
use domainstack_application::ports::SectionCacheRepository;
use domainstack_domain::{CachedSection, DomainError, Section};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

type SectionRow = (String, String, Option<String>, i64, i64);

pub struct SqliteSectionCacheRepository {
    pool: SqlitePool,
}

impl SqliteSectionCacheRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionCacheRepository for SqliteSectionCacheRepository {
    #[instrument(skip(self))]
    async fn get_cached_section(
        &self,
        section: Section,
        domain: &str,
    ) -> Result<Option<CachedSection>, DomainError> {
        let row = sqlx::query_as::<_, SectionRow>(
            "SELECT domain, payload, failure, fetched_at, expires_at
             FROM section_cache WHERE domain = ? AND section = ?",
        )
        .bind(domain)
        .bind(section.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to query cached section"))?;

        let Some((domain, payload, failure, fetched_at, expires_at)) = row else {
            return Ok(None);
        };

        let payload = serde_json::from_str(&payload)
            .map_err(|e| DomainError::DatabaseError(format!("Corrupt cached payload: {e}")))?;
        let failure = failure
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(|e| DomainError::DatabaseError(format!("Corrupt failure marker: {e}")))?;

        Ok(Some(CachedSection {
            domain,
            section,
            payload,
            failure,
            fetched_at: from_millis(fetched_at),
            expires_at: from_millis(expires_at),
        }))
    }

    #[instrument(skip(self, record), fields(domain = %record.domain, section = %record.section))]
    async fn upsert_section_record(&self, record: &CachedSection) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&record.payload)
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        let failure = record
            .failure
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO section_cache (domain, section, payload, failure, fetched_at, expires_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(domain, section) DO UPDATE SET
                payload = excluded.payload,
                failure = excluded.failure,
                fetched_at = excluded.fetched_at,
                expires_at = excluded.expires_at",
        )
        .bind(&record.domain)
        .bind(record.section.as_str())
        .bind(&payload)
        .bind(failure)
        .bind(to_millis(record.fetched_at))
        .bind(to_millis(record.expires_at))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to upsert cached section"))?;

        debug!(bytes = payload.len(), "Cached section stored");
        Ok(())
    }
}
