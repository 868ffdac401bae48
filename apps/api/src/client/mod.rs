//! Typed HTTP client for the referral API.
//!
//! Every call maps onto one endpoint; non-2xx responses come back as
//! `ClientError::Api` carrying the server's `message`.

pub mod dashboard;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::candidates::filter::CandidateFilter;
use crate::candidates::handlers::UpdateStatusRequest;
use crate::candidates::metrics::CandidateMetrics;
use crate::candidates::upload::{PDF_MEDIA_TYPE, RESUME_FIELD};
use crate::errors::MessageResponse;
use crate::models::{Candidate, CandidateStatus};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// A PDF to attach to a new referral.
#[derive(Debug, Clone)]
pub struct ResumeAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields submitted when adding a referral.
#[derive(Debug, Clone)]
pub struct NewReferral {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub resume: Option<ResumeAttachment>,
}

#[derive(Debug, Clone)]
pub struct ReferralClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReferralClient {
    /// `base_url` is the service root, e.g. `http://localhost:8001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/candidates{path}", self.base_url)
    }

    pub async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, ClientError> {
        let response = self.http.get(self.url("")).query(filter).send().await?;
        decode(response).await
    }

    pub async fn metrics(&self) -> Result<CandidateMetrics, ClientError> {
        let response = self.http.get(self.url("/metrics")).send().await?;
        decode(response).await
    }

    pub async fn create(&self, referral: &NewReferral) -> Result<Candidate, ClientError> {
        let mut form = Form::new()
            .text("name", referral.name.clone())
            .text("email", referral.email.clone())
            .text("phone", referral.phone.clone())
            .text("job_title", referral.job_title.clone());
        if let Some(resume) = &referral.resume {
            let part = Part::bytes(resume.bytes.clone())
                .file_name(resume.file_name.clone())
                .mime_str(PDF_MEDIA_TYPE)?;
            form = form.part(RESUME_FIELD, part);
        }

        let response = self.http.post(self.url("")).multipart(form).send().await?;
        decode(response).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: CandidateStatus,
    ) -> Result<Candidate, ClientError> {
        let body = UpdateStatusRequest {
            status: Some(status.as_str().to_string()),
        };
        let response = self
            .http
            .put(self.url(&format!("/{id}/status")))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        let response = self.http.delete(self.url(&format!("/{id}"))).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&text)
        .map(|m| m.message)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
