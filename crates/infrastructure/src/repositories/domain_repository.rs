use crate::database::{db_error, from_millis, to_millis};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domainstack_application::ports::DomainRepository;
use domainstack_domain::{Domain, DomainError, DomainName};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::instrument;

type DomainRow = (i64, String, String, Option<i64>, i64);

pub struct SqliteDomainRepository {
    pool: SqlitePool,
}

impl SqliteDomainRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_domain(row: DomainRow) -> Result<Domain, DomainError> {
        let (id, name, tld, last_accessed_at, created_at) = row;

        Ok(Domain {
            id: Some(id),
            name: DomainName::parse(&name)?,
            tld: Arc::from(tld.as_str()),
            last_accessed_at: last_accessed_at.map(from_millis),
            created_at: Some(from_millis(created_at)),
        })
    }
}

#[async_trait]
impl DomainRepository for SqliteDomainRepository {
    #[instrument(skip(self), fields(domain = %name))]
    async fn ensure(&self, name: &DomainName) -> Result<Domain, DomainError> {
        sqlx::query(
            "INSERT INTO domains (name, tld, created_at) VALUES (?, ?, ?)
             ON CONFLICT(name) DO NOTHING",
        )
        .bind(name.as_str())
        .bind(name.tld())
        .bind(to_millis(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert domain"))?;

        let row = sqlx::query_as::<_, DomainRow>(
            "SELECT id, name, tld, last_accessed_at, created_at FROM domains WHERE name = ?",
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to load domain"))?;

        Self::row_to_domain(row)
    }

    #[instrument(skip(self), fields(domain = %name))]
    async fn update_last_accessed(
        &self,
        name: &DomainName,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let at = to_millis(at);

        // Never move the timestamp backwards when writes race.
        sqlx::query(
            "INSERT INTO domains (name, tld, last_accessed_at, created_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET last_accessed_at = excluded.last_accessed_at
             WHERE domains.last_accessed_at IS NULL
                OR domains.last_accessed_at < excluded.last_accessed_at",
        )
        .bind(name.as_str())
        .bind(name.tld())
        .bind(at)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update last access"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_last_accessed(&self, name: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
        let row: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT last_accessed_at FROM domains WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to query last access"))?;

        Ok(row.and_then(|(at,)| at).map(from_millis))
    }

    #[instrument(skip(self))]
    async fn list_recently_accessed(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<String>, DomainError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM domains
             WHERE last_accessed_at >= ?
             ORDER BY last_accessed_at DESC
             LIMIT ?",
        )
        .bind(to_millis(since))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list recently accessed domains"))?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
