pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::candidates::handlers;
use crate::candidates::upload::PUBLIC_PREFIX;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.resumes.dir());
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/candidates",
            get(handlers::handle_list).post(handlers::handle_create),
        )
        .route(
            "/api/candidates/",
            get(handlers::handle_list).post(handlers::handle_create),
        )
        .route("/api/candidates/metrics", get(handlers::handle_metrics))
        .route("/api/candidates/:id", delete(handlers::handle_delete))
        .route(
            "/api/candidates/:id/status",
            put(handlers::handle_update_status),
        )
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
