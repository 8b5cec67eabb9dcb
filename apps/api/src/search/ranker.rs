//! Candidate ranking: an additive, explainable score per candidate.
//!
//! | signal                                             | points        |
//! |----------------------------------------------------|---------------|
//! | query keyword found in bio / role / custom role     | +10 each      |
//! | requested skill in candidate skills                 | +15 each      |
//! | requested location in preferred locations           | +20           |
//! | requested job type equals job preference            | +15           |
//! | requested role contained in role / custom role      | +25           |
//!
//! The total is capped at 100. Candidates are never filtered out; the final
//! order is by descending score and stable on ties.

use serde::{Deserialize, Serialize};

pub const KEYWORD_POINTS: u32 = 10;
pub const SKILL_POINTS: u32 = 15;
pub const LOCATION_POINTS: u32 = 20;
pub const JOB_TYPE_POINTS: u32 = 15;
pub const ROLE_POINTS: u32 = 25;
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub custom_role: Option<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub job_preference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    pub keywords_matched: Vec<String>,
    pub skills_matched: Vec<String>,
    pub location_match: bool,
    pub job_type_match: bool,
    pub role_match: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult<'a> {
    pub candidate: &'a CandidateRecord,
    pub score: u32,
    pub explanation: MatchExplanation,
}

/// Query terms after trimming, lowercasing and case-insensitive dedupe.
struct PreparedQuery {
    keywords: Vec<String>,
    skills: Vec<String>,
    role: Option<String>,
    location: Option<String>,
    job_type: Option<String>,
}

impl PreparedQuery {
    fn new(query: &SearchQuery) -> Self {
        Self {
            keywords: fold_list(&query.keywords),
            skills: fold_list(&query.skills),
            role: fold(query.role.as_deref()),
            location: fold(query.location.as_deref()),
            job_type: fold(query.job_type.as_deref()),
        }
    }
}

fn fold(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn fold_list(values: &[String]) -> Vec<String> {
    let mut folded: Vec<String> = Vec::new();
    for value in values {
        if let Some(v) = fold(Some(value)) {
            if !folded.contains(&v) {
                folded.push(v);
            }
        }
    }
    folded
}

/// Scores one candidate against a prepared query.
fn score_candidate(candidate: &CandidateRecord, query: &PreparedQuery) -> (u32, MatchExplanation) {
    let searchable: Vec<String> = [&candidate.bio, &candidate.role, &candidate.custom_role]
        .into_iter()
        .flatten()
        .map(|field| field.to_lowercase())
        .collect();
    let roles: Vec<String> = [&candidate.role, &candidate.custom_role]
        .into_iter()
        .flatten()
        .map(|field| field.to_lowercase())
        .collect();
    let skills: Vec<String> = candidate
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    let keywords_matched: Vec<String> = query
        .keywords
        .iter()
        .filter(|k| searchable.iter().any(|field| field.contains(k.as_str())))
        .cloned()
        .collect();

    let skills_matched: Vec<String> = query
        .skills
        .iter()
        .filter(|s| skills.contains(s))
        .cloned()
        .collect();

    let location_match = query.location.as_ref().is_some_and(|loc| {
        candidate
            .preferred_locations
            .iter()
            .any(|p| p.trim().to_lowercase() == *loc)
    });

    let job_type_match = query.job_type.as_ref().is_some_and(|jt| {
        candidate
            .job_preference
            .as_deref()
            .is_some_and(|pref| pref.trim().to_lowercase() == *jt)
    });

    let role_match = query
        .role
        .as_ref()
        .is_some_and(|r| roles.iter().any(|role| role.contains(r.as_str())));

    let mut score = KEYWORD_POINTS * keywords_matched.len() as u32
        + SKILL_POINTS * skills_matched.len() as u32;
    if location_match {
        score += LOCATION_POINTS;
    }
    if job_type_match {
        score += JOB_TYPE_POINTS;
    }
    if role_match {
        score += ROLE_POINTS;
    }

    (
        score.min(MAX_SCORE),
        MatchExplanation {
            keywords_matched,
            skills_matched,
            location_match,
            job_type_match,
            role_match,
        },
    )
}

/// Ranks every candidate against `query`, best first. Ties keep input order.
pub fn rank<'a>(candidates: &'a [CandidateRecord], query: &SearchQuery) -> Vec<RankedResult<'a>> {
    let prepared = PreparedQuery::new(query);

    let mut results: Vec<RankedResult<'a>> = candidates
        .iter()
        .map(|candidate| {
            let (score, explanation) = score_candidate(candidate, &prepared);
            RankedResult {
                candidate,
                score,
                explanation,
            }
        })
        .collect();

    // Vec::sort_by is stable
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}
