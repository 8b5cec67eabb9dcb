// Resume scoring engine: normalization, keyword extraction, section and
// readability heuristics, weighted aggregation, and the ATS report view.
// Everything below `handlers` is pure and synchronous.

pub mod analyzer;
pub mod ats;
pub mod error;
pub mod handlers;
pub mod keywords;
pub mod normalize;
pub mod profiles;
pub mod readability;
pub mod sections;
pub mod vocabulary;
