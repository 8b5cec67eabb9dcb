use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::scoring::error::ScoringError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::UnknownRole(_) => AppError::NotFound(err.to_string()),
            ScoringError::DuplicateRole(_) => AppError::Conflict(err.to_string()),
            ScoringError::EmptyInput(_) | ScoringError::InvalidWeights { .. } => {
                AppError::Validation(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_errors_map_to_status() {
        let cases = [
            (ScoringError::EmptyInput("resume text"), StatusCode::BAD_REQUEST),
            (
                ScoringError::InvalidWeights {
                    role: "x".to_string(),
                    sum: 1.5,
                },
                StatusCode::BAD_REQUEST,
            ),
            (ScoringError::UnknownRole("x".to_string()), StatusCode::NOT_FOUND),
            (ScoringError::DuplicateRole("x".to_string()), StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_empty_input_message() {
        let err = AppError::from(ScoringError::EmptyInput("resume text"));
        assert_eq!(err.to_string(), "Validation error: resume text cannot be empty");
    }

    #[test]
    fn test_internal_error_is_500() {
        let err = AppError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
