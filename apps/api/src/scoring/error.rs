use thiserror::Error;

/// Errors raised by the scoring engine. Everything else is defaulted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("weights for role '{role}' must sum to 1.0 (got {sum:.4})")]
    InvalidWeights { role: String, sum: f64 },

    #[error("role '{0}' already exists")]
    DuplicateRole(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),
}
