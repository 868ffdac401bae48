//! Candidate persistence behind a pluggable, trait-based store.
//!
//! Default: `PgCandidateStore` over the `candidates` table.
//! Tests run the handlers against `memory::InMemoryCandidateStore`.
//!
//! `AppState` holds an `Arc<dyn CandidateStore>`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::candidates::filter::CandidateFilter;
use crate::candidates::metrics::StatusCounts;
use crate::candidates::schema::NewCandidate;
use crate::errors::AppError;
use crate::models::{Candidate, CandidateRow, CandidateStatus};

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Inserts a validated candidate. A duplicate email is a validation error.
    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate, AppError>;

    /// Returns the matching candidates in creation order.
    async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, AppError>;

    async fn find(&self, id: Uuid) -> Result<Option<Candidate>, AppError>;

    /// Sets the status of one candidate. `None` when the id does not exist.
    async fn update_status(
        &self,
        id: Uuid,
        status: CandidateStatus,
    ) -> Result<Option<Candidate>, AppError>;

    /// Removes one candidate. `false` when the id does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn count_by_status(&self) -> Result<StatusCounts, AppError>;
}

pub fn duplicate_email_message(email: &str) -> String {
    format!("A candidate with email {email} already exists")
}

pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidates (id, name, email, phone, job_title, status, resume_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(&candidate.job_title)
        .bind(candidate.status.as_str())
        .bind(&candidate.resume_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| translate_write_error(e, &candidate.email))?;

        into_candidate(row)
    }

    async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT * FROM candidates
            WHERE ($1::text IS NULL OR name ILIKE $1 OR job_title ILIKE $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(filter.search_pattern())
        .bind(filter.status_term())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(into_candidate).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Candidate>, AppError> {
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(into_candidate)
            .transpose()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CandidateStatus,
    ) -> Result<Option<Candidate>, AppError> {
        sqlx::query_as::<_, CandidateRow>(
            "UPDATE candidates SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(into_candidate)
        .transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self) -> Result<StatusCounts, AppError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM candidates GROUP BY status")
                .fetch_all(&self.pool)
                .await?;

        let mut counts = StatusCounts::default();
        for (status, n) in rows {
            match status.parse::<CandidateStatus>() {
                Ok(status) => counts.add(status, n.max(0) as u64),
                Err(e) => tracing::warn!("Skipping {n} candidates in metrics: {e}"),
            }
        }
        Ok(counts)
    }
}

fn into_candidate(row: CandidateRow) -> Result<Candidate, AppError> {
    let id = row.id;
    Candidate::try_from(row)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("candidate {id} has corrupt status: {e}")))
}

/// Maps constraint violations on write to 400s; everything else stays a 500.
fn translate_write_error(err: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::Validation(duplicate_email_message(email));
        }
        if db.is_check_violation() {
            return AppError::Validation(format!(
                "Candidate validation failed: {}",
                db.message()
            ));
        }
    }
    AppError::Database(err)
}
