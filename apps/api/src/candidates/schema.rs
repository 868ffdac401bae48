//! Field-level rules a candidate must satisfy before it reaches the store.
//!
//! Every problem is collected into a single 400. The table repeats the
//! structural constraints (unique email, status enum, name length).

use email_address::EmailAddress;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::CandidateStatus;

pub const MIN_NAME_CHARS: usize = 2;

/// Raw referral fields as submitted. Every field is optional here so that
/// absence becomes a validation message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub status: Option<String>,
}

/// A candidate that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub status: CandidateStatus,
    pub resume_url: Option<String>,
}

impl CandidateForm {
    /// Checks all fields and reports every failure at once.
    /// A missing or empty `status` falls back to `Pending`.
    pub fn validate(self) -> Result<NewCandidate, AppError> {
        let mut problems = Vec::new();

        let name = required("name", self.name, &mut problems);
        let email = required("email", self.email, &mut problems);
        let phone = required("phone", self.phone, &mut problems);
        let job_title = required("job_title", self.job_title, &mut problems);

        if let Some(name) = &name {
            if name.chars().count() < MIN_NAME_CHARS {
                problems.push(format!(
                    "name must be at least {MIN_NAME_CHARS} characters"
                ));
            }
        }

        if let Some(email) = &email {
            if !EmailAddress::is_valid(email) {
                problems.push(format!("email `{email}` is not a valid email address"));
            }
        }

        let status = match self.status.as_deref() {
            None | Some("") => Some(CandidateStatus::default()),
            Some(raw) => match raw.parse::<CandidateStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    problems.push(format!("status: {e}"));
                    None
                }
            },
        };

        match (name, email, phone, job_title, status) {
            (Some(name), Some(email), Some(phone), Some(job_title), Some(status))
                if problems.is_empty() =>
            {
                Ok(NewCandidate {
                    name,
                    email,
                    phone,
                    job_title,
                    status,
                    resume_url: None,
                })
            }
            _ => Err(AppError::Validation(format!(
                "Candidate validation failed: {}",
                problems.join(", ")
            ))),
        }
    }
}

fn required(field: &str, value: Option<String>, problems: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            problems.push(format!("{field} is required"));
            None
        }
    }
}

/// Parses a status coming from a client, turning unknown values into a 400.
pub fn parse_status(raw: Option<&str>) -> Result<CandidateStatus, AppError> {
    match raw {
        None | Some("") => Err(AppError::Validation("status is required".to_string())),
        Some(raw) => raw
            .parse()
            .map_err(|e: crate::models::InvalidStatus| AppError::Validation(e.to_string())),
    }
}
