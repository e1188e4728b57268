//! HTTP front end for the skill analyzer
//!
//! Clients upload a PGN file, fetch the skill report for it and download the
//! study guide matching a category. Analysis runs the blocking engine
//! pipeline on tokio's blocking pool.

use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use skill_analysis::{EvaluatorLauncher, Thresholds};
use tower_http::trace::TraceLayer;

pub mod config;
mod handlers;
mod response;
pub mod store;

pub use config::{AppConfig, ServerConfig};
pub use store::{UploadStore, UploadSummary, UploadedFile};

#[derive(Clone)]
pub struct AppState {
    pub uploads: Arc<UploadStore>,
    /// Starts one engine per analysis request.
    pub launcher: Arc<dyn EvaluatorLauncher>,
    pub thresholds: Thresholds,
    pub guides_dir: PathBuf,
    pub max_upload_bytes: usize,
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .route("/health", get(handlers::health))
        .route("/uploads", post(handlers::upload_pgn))
        .route("/uploads/latest/analysis", get(handlers::latest_analysis))
        .route("/uploads/{id}/analysis", get(handlers::upload_analysis))
        .route("/uploads/{id}/guide", get(handlers::download_guide))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
