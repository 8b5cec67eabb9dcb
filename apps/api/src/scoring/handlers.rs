//! Axum route handlers for the scoring API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::scoring::analyzer::{analyze_resume, AnalysisResult};
use crate::scoring::ats::{build_report, AtsReport, AtsRequest};
use crate::scoring::error::ScoringError;
use crate::scoring::profiles::{RoleProfile, RoleRegistry};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    /// Registry id or title of a known role.
    #[serde(default)]
    pub role_id: Option<String>,
    /// Caller-supplied profile; takes precedence over `role_id`.
    #[serde(default)]
    pub role_profile: Option<RoleProfile>,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<RoleProfile>,
}

/// Picks the profile for a request: inline profile, then registry lookup,
/// then the general profile.
fn resolve_role(request: &AnalysisRequest, registry: &RoleRegistry) -> Result<RoleProfile, ScoringError> {
    if let Some(profile) = &request.role_profile {
        let mut profile = profile.clone();
        if profile.id.trim().is_empty() {
            profile.id = "custom".to_string();
        }
        profile.validate()?;
        return Ok(profile);
    }
    match request.role_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => registry
            .find(id)
            .cloned()
            .ok_or_else(|| ScoringError::UnknownRole(id.to_string())),
        _ => Ok(RoleProfile::general()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.roles.list().cloned().collect(),
    })
}

/// POST /api/v1/analysis
///
/// Full resume analysis for the interactive client.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let role = resolve_role(&request, &state.roles)?;
    let result = analyze_resume(&request.resume_text, request.job_description.as_deref(), &role)?;

    info!(
        role = %role.id,
        score = result.overall_score,
        issues = result.issues.len(),
        "Analysis complete"
    );

    Ok(Json(result))
}

/// POST /api/v1/ats/score
///
/// Graded ATS report. Persisting the report is the caller's responsibility.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<AtsRequest>,
) -> Result<Json<AtsReport>, AppError> {
    let report = build_report(&request, &state.roles)?;

    info!(
        target_role = request.target_role.as_deref().unwrap_or("general"),
        score = report.score,
        grade = ?report.grade,
        "ATS report built"
    );

    Ok(Json(report))
}
