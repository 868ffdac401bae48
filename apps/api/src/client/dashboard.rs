//! Dashboard state: the fetched candidate list, the metrics panel and the
//! local search/status filters.
//!
//! Mutations never patch local state. After each successful call both the
//! list and the metrics are fetched again so the two views cannot drift.
//! The filtered view is derived on demand and never stored.

use tracing::warn;
use uuid::Uuid;

use crate::candidates::filter::CandidateFilter;
use crate::candidates::metrics::CandidateMetrics;
use crate::client::{ClientError, NewReferral, ReferralClient};
use crate::models::{Candidate, CandidateStatus};

/// Transient user-facing outcome of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

pub struct Dashboard {
    client: ReferralClient,
    candidates: Vec<Candidate>,
    metrics: Option<CandidateMetrics>,
    search: String,
    status_filter: Option<CandidateStatus>,
    notices: Vec<Notice>,
}

impl Dashboard {
    pub fn new(client: ReferralClient) -> Self {
        Self {
            client,
            candidates: Vec::new(),
            metrics: None,
            search: String::new(),
            status_filter: None,
            notices: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn metrics(&self) -> Option<&CandidateMetrics> {
        self.metrics.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// `None` shows every status.
    pub fn set_status_filter(&mut self, status: Option<CandidateStatus>) {
        self.status_filter = status;
    }

    /// Candidates matching the current search text and status filter.
    pub fn filtered(&self) -> Vec<&Candidate> {
        filtered_view(&self.candidates, &self.search, self.status_filter)
    }

    /// Fetches list and metrics together.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let everything = CandidateFilter::default();
        let (candidates, metrics) =
            tokio::join!(self.client.list(&everything), self.client.metrics());
        match candidates {
            Ok(list) => self.candidates = list,
            Err(e) => {
                self.fail("Failed to fetch candidates", &e);
                return Err(e);
            }
        }
        match metrics {
            Ok(m) => self.metrics = Some(m),
            // metrics failures do not fail the load
            Err(e) => warn!("Error fetching metrics: {e}"),
        }
        Ok(())
    }

    pub async fn add(&mut self, referral: &NewReferral) -> Result<Candidate, ClientError> {
        match self.client.create(referral).await {
            Ok(candidate) => {
                self.succeed("Candidate added successfully!").await;
                Ok(candidate)
            }
            Err(e) => {
                self.fail("Failed to add candidate", &e);
                Err(e)
            }
        }
    }

    pub async fn change_status(
        &mut self,
        id: Uuid,
        status: CandidateStatus,
    ) -> Result<Candidate, ClientError> {
        match self.client.update_status(id, status).await {
            Ok(candidate) => {
                self.succeed("Status updated successfully!").await;
                Ok(candidate)
            }
            Err(e) => {
                self.fail("Failed to update status", &e);
                Err(e)
            }
        }
    }

    pub async fn remove(&mut self, id: Uuid) -> Result<(), ClientError> {
        match self.client.delete(id).await {
            Ok(_) => {
                self.succeed("Candidate deleted successfully!").await;
                Ok(())
            }
            Err(e) => {
                self.fail("Failed to delete candidate", &e);
                Err(e)
            }
        }
    }

    async fn succeed(&mut self, message: &str) {
        self.notices.push(Notice::Success(message.to_string()));
        // failure is already recorded as a notice by load()
        let _ = self.load().await;
    }

    fn fail(&mut self, fallback: &str, err: &ClientError) {
        let message = match err {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        };
        warn!("{fallback}: {err}");
        self.notices.push(Notice::Failure(message));
    }
}

/// Pure view derivation over an already-fetched list.
pub fn filtered_view<'a>(
    candidates: &'a [Candidate],
    search: &str,
    status: Option<CandidateStatus>,
) -> Vec<&'a Candidate> {
    let filter = CandidateFilter {
        search: Some(search.to_string()),
        status: status.map(|s| s.as_str().to_string()),
    };
    filter.apply(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_router;
    use crate::routes::tests::test_state;

    async fn spawn_app(upload_dir: &std::path::Path) -> ReferralClient {
        let (state, _) = test_state(upload_dir);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        ReferralClient::new(format!("http://{addr}"))
    }

    fn referral(name: &str, email: &str, job_title: &str) -> NewReferral {
        NewReferral {
            name: name.to_string(),
            email: email.to_string(),
            phone: "1234567890".to_string(),
            job_title: job_title.to_string(),
            resume: None,
        }
    }

    #[test]
    fn test_filtered_view_is_pure() {
        let now = chrono::Utc::now();
        let list = vec![Candidate {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "1234567890".to_string(),
            job_title: "Engineer".to_string(),
            status: CandidateStatus::Pending,
            resume_url: None,
            created_at: now,
            updated_at: now,
        }];

        assert_eq!(filtered_view(&list, "", None).len(), 1);
        assert_eq!(filtered_view(&list, "ENGINEER", None).len(), 1);
        assert!(filtered_view(&list, "", Some(CandidateStatus::Hired)).is_empty());
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_refresh_list_and_metrics() {
        let tmp = tempfile::tempdir().unwrap();
        let mut dashboard = Dashboard::new(spawn_app(tmp.path()).await);
        dashboard.load().await.unwrap();
        assert!(dashboard.candidates().is_empty());
        let pending_before = dashboard.metrics().unwrap().by_status.pending;

        let jane = dashboard
            .add(&referral("Jane Doe", "jane@x.com", "Engineer"))
            .await
            .unwrap();
        assert_eq!(jane.status, CandidateStatus::Pending);
        assert_eq!(jane.resume_url, None);
        assert_eq!(dashboard.candidates().len(), 1);
        assert_eq!(dashboard.metrics().unwrap().total, 1);

        dashboard
            .change_status(jane.id, CandidateStatus::Hired)
            .await
            .unwrap();
        assert_eq!(dashboard.candidates()[0].status, CandidateStatus::Hired);
        let metrics = dashboard.metrics().unwrap();
        assert_eq!(metrics.by_status.hired, 1);
        assert_eq!(metrics.by_status.pending, pending_before);

        dashboard.remove(jane.id).await.unwrap();
        assert!(dashboard.candidates().is_empty());
        assert_eq!(dashboard.metrics().unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_state_and_records_notice() {
        let tmp = tempfile::tempdir().unwrap();
        let mut dashboard = Dashboard::new(spawn_app(tmp.path()).await);
        dashboard
            .add(&referral("Jane Doe", "jane@x.com", "Engineer"))
            .await
            .unwrap();
        let snapshot = dashboard.candidates().to_vec();

        let err = dashboard
            .add(&referral("Jane Again", "jane@x.com", "Engineer"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(dashboard.candidates(), snapshot.as_slice());
        assert!(matches!(dashboard.notices().last(), Some(Notice::Failure(_))));

        let err = dashboard.remove(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(dashboard.candidates().len(), 1);
    }

    #[tokio::test]
    async fn test_local_filters_follow_list() {
        let tmp = tempfile::tempdir().unwrap();
        let mut dashboard = Dashboard::new(spawn_app(tmp.path()).await);
        for (name, email, title) in [
            ("Jane Doe", "jane@x.com", "Engineer"),
            ("Bengt Larsson", "bengt@x.com", "Designer"),
            ("Ana Ruiz", "ana@x.com", "Product Manager"),
        ] {
            dashboard.add(&referral(name, email, title)).await.unwrap();
        }

        dashboard.set_search("eng");
        assert_eq!(dashboard.filtered().len(), 2);

        let ana = dashboard
            .candidates()
            .iter()
            .find(|c| c.name == "Ana Ruiz")
            .map(|c| c.id)
            .unwrap();
        dashboard
            .change_status(ana, CandidateStatus::Reviewed)
            .await
            .unwrap();

        dashboard.set_search("");
        dashboard.set_status_filter(Some(CandidateStatus::Reviewed));
        let reviewed = dashboard.filtered();
        assert_eq!(reviewed.len(), 1);
        assert_eq!(reviewed[0].name, "Ana Ruiz");

        dashboard.set_status_filter(None);
        assert_eq!(dashboard.filtered().len(), 3);
    }

    #[tokio::test]
    async fn test_resume_upload_through_client() {
        let tmp = tempfile::tempdir().unwrap();
        let client = spawn_app(tmp.path()).await;

        let mut with_resume = referral("Jane Doe", "jane@x.com", "Engineer");
        with_resume.resume = Some(crate::client::ResumeAttachment {
            file_name: "jane.pdf".to_string(),
            bytes: b"%PDF-1.4".to_vec(),
        });
        let created = client.create(&with_resume).await.unwrap();
        let resume_url = created.resume_url.clone().unwrap();
        assert!(resume_url.starts_with("/uploads/"));

        client.delete(created.id).await.unwrap();
        let file_name = resume_url.trim_start_matches("/uploads/");
        assert!(!tmp.path().join(file_name).exists());
    }
}
