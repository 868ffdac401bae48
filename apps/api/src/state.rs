use std::sync::Arc;

use crate::candidates::store::CandidateStore;
use crate::candidates::upload::ResumeStorage;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable candidate store. Default: PgCandidateStore.
    pub store: Arc<dyn CandidateStore>,
    pub resumes: ResumeStorage,
    pub config: Config,
}
