//! Text normalization shared by every matcher in the engine.

use serde::Serialize;

use crate::scoring::error::ScoringError;
use crate::scoring::readability::sentence_count;

/// Lowercases, collapses every whitespace run (including newlines) to a single
/// space, and trims. Idempotent.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A resume (or any free text) prepared for analysis. Immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(skip)]
    raw: String,
    normalized: String,
    word_count: usize,
    sentence_count: usize,
}

impl Document {
    /// Builds a document, rejecting empty or whitespace-only text.
    pub fn new(raw: &str) -> Result<Self, ScoringError> {
        if raw.trim().is_empty() {
            return Err(ScoringError::EmptyInput("resume text"));
        }
        let normalized = normalize(raw);
        let word_count = normalized.split(' ').filter(|w| !w.is_empty()).count();
        Ok(Self {
            raw: raw.to_string(),
            normalized,
            word_count,
            sentence_count: sentence_count(raw),
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }
}
