use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::candidates::filter::CandidateFilter;
use crate::candidates::metrics::CandidateMetrics;
use crate::candidates::schema::parse_status;
use crate::candidates::upload::{read_referral_form, StoredResume};
use crate::errors::{AppError, MessageResponse};
use crate::models::Candidate;
use crate::state::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Candidate not found";
pub const DELETED_MESSAGE: &str = "Candidate deleted successfully";

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// A malformed id cannot name a stored candidate.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

/// POST /api/candidates
///
/// Validates the form before anything touches disk. If the insert fails after
/// the resume was written, the file is removed again.
pub async fn handle_create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    let upload = read_referral_form(multipart?).await?;
    let mut new_candidate = upload.form.validate()?;

    let stored = match &upload.resume {
        Some(file) => Some(state.resumes.store(file).await?),
        None => None,
    };
    new_candidate.resume_url = stored.as_ref().map(StoredResume::public_url);

    match state.store.insert(new_candidate).await {
        Ok(candidate) => {
            info!("Created candidate {} ({})", candidate.id, candidate.email);
            Ok((StatusCode::CREATED, Json(candidate)))
        }
        Err(e) => {
            if let Some(stored) = stored {
                state.resumes.remove(&stored.public_url()).await;
            }
            Err(e)
        }
    }
}

/// GET /api/candidates?search=&status=
pub async fn handle_list(
    State(state): State<AppState>,
    query: Result<Query<CandidateFilter>, QueryRejection>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let Query(filter) = query?;
    Ok(Json(state.store.list(&filter).await?))
}

/// PUT /api/candidates/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Candidate>, AppError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    let status = parse_status(req.status.as_deref())?;

    let candidate = state
        .store
        .update_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    info!("Candidate {id} moved to {status}");
    Ok(Json(candidate))
}

/// DELETE /api/candidates/:id
///
/// The resume goes first; a file that is already gone does not block the
/// record removal.
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    let candidate = state
        .store
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    if let Some(resume_url) = &candidate.resume_url {
        state.resumes.remove(resume_url).await;
    }

    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    info!("Deleted candidate {id}");
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}

/// GET /api/candidates/metrics
pub async fn handle_metrics(
    State(state): State<AppState>,
) -> Result<Json<CandidateMetrics>, AppError> {
    let counts = state.store.count_by_status().await?;
    Ok(Json(CandidateMetrics::from(counts)))
}
