//! Axum route handlers for candidate search.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::search::pagination::{Page, PageParams};
use crate::search::ranker::{rank, CandidateRecord, RankedResult, SearchQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
    #[serde(default)]
    pub query: SearchQuery,
    #[serde(flatten)]
    pub page: PageParams,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse<'a> {
    pub results: Vec<RankedResult<'a>>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// POST /api/v1/candidates/search
///
/// Ranks the supplied candidates against the query and returns one page.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Response, AppError> {
    let page = Page::new(
        request.page,
        state.config.search_default_limit,
        state.config.search_max_limit,
    )?;

    let ranked = rank(&request.candidates, &request.query);
    let total = ranked.len();

    info!(
        total,
        page = page.page,
        limit = page.limit,
        top_score = ranked.first().map(|r| r.score).unwrap_or(0),
        "Candidate search ranked"
    );

    // Results borrow from the request, so serialize before it drops.
    Ok(Json(SearchResponse {
        results: page.slice(ranked),
        total,
        page: page.page,
        limit: page.limit,
    })
    .into_response())
}
