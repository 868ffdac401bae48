use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::candidates::filter::CandidateFilter;
use crate::candidates::metrics::StatusCounts;
use crate::candidates::schema::NewCandidate;
use crate::candidates::store::{duplicate_email_message, CandidateStore};
use crate::errors::AppError;
use crate::models::{Candidate, CandidateStatus};

/// Process-local store with the same uniqueness and ordering rules as the
/// Postgres table. Backs the router and dashboard tests.
#[derive(Default)]
pub struct InMemoryCandidateStore {
    candidates: Mutex<Vec<Candidate>>,
}

impl InMemoryCandidateStore {
    pub async fn len(&self) -> usize {
        self.candidates.lock().await.len()
    }
}

#[async_trait]
impl CandidateStore for InMemoryCandidateStore {
    async fn insert(&self, candidate: NewCandidate) -> Result<Candidate, AppError> {
        let mut candidates = self.candidates.lock().await;
        if candidates.iter().any(|c| c.email == candidate.email) {
            return Err(AppError::Validation(duplicate_email_message(
                &candidate.email,
            )));
        }
        let now = Utc::now();
        let stored = Candidate {
            id: Uuid::new_v4(),
            name: candidate.name,
            email: candidate.email,
            phone: candidate.phone,
            job_title: candidate.job_title,
            status: candidate.status,
            resume_url: candidate.resume_url,
            created_at: now,
            updated_at: now,
        };
        candidates.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, AppError> {
        let candidates = self.candidates.lock().await;
        Ok(filter.apply(&candidates).into_iter().cloned().collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Candidate>, AppError> {
        let candidates = self.candidates.lock().await;
        Ok(candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CandidateStatus,
    ) -> Result<Option<Candidate>, AppError> {
        let mut candidates = self.candidates.lock().await;
        Ok(candidates.iter_mut().find(|c| c.id == id).map(|c| {
            c.status = status;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut candidates = self.candidates.lock().await;
        let before = candidates.len();
        candidates.retain(|c| c.id != id);
        Ok(candidates.len() < before)
    }

    async fn count_by_status(&self) -> Result<StatusCounts, AppError> {
        let candidates = self.candidates.lock().await;
        Ok(candidates.iter().map(|c| c.status).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_candidate(email: &str) -> NewCandidate {
        NewCandidate {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            phone: "1234567890".to_string(),
            job_title: "Engineer".to_string(),
            status: CandidateStatus::Pending,
            resume_url: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_and_count_unchanged() {
        let store = InMemoryCandidateStore::default();
        store.insert(new_candidate("jane@x.com")).await.unwrap();
        let err = store.insert(new_candidate("jane@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let store = InMemoryCandidateStore::default();
        let id = Uuid::new_v4();
        assert!(store
            .update_status(id, CandidateStatus::Hired)
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_touches_only_status() {
        let store = InMemoryCandidateStore::default();
        let created = store.insert(new_candidate("jane@x.com")).await.unwrap();
        let updated = store
            .update_status(created.id, CandidateStatus::Reviewed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, CandidateStatus::Reviewed);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }
}
