pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers as scoring;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/roles", get(scoring::handle_list_roles))
        .route("/api/v1/analysis", post(scoring::handle_analyze))
        .route("/api/v1/ats/score", post(scoring::handle_ats_score))
        // Candidate search API
        .route("/api/v1/candidates/search", post(search::handle_search))
        .with_state(state)
}
