//! ATS report: the flattened, graded view of an analysis that the external
//! scoring endpoint returns. The caller owns persistence of these reports.

use serde::{Deserialize, Serialize};

use crate::scoring::analyzer::{analyze, build_target, ScoreBreakdown};
use crate::scoring::error::ScoringError;
use crate::scoring::keywords::{contains_term, KeywordSet};
use crate::scoring::normalize::{normalize, Document};
use crate::scoring::profiles::{RoleProfile, RoleRegistry};
use crate::scoring::vocabulary::TECH_SKILLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Grade::A,
            s if s >= 70 => Grade::B,
            s if s >= 60 => Grade::C,
            s if s >= 50 => Grade::D,
            _ => Grade::F,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub target_role: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub readability_score: f64,
    pub readability_label: String,
    pub keyword_match_percent: u32,
    pub sections_found: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub score: u32,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
    pub skills_found: Vec<String>,
    pub keywords_found: Vec<String>,
    pub matched_requirements: Vec<String>,
    pub missing_requirements: Vec<String>,
    pub suggestions: Vec<String>,
    pub stats: AtsStats,
}

/// Scores a resume for the external endpoint. An unknown `target_role` is an
/// error; an absent one falls back to the general profile.
pub fn build_report(request: &AtsRequest, registry: &RoleRegistry) -> Result<AtsReport, ScoringError> {
    let document = Document::new(&request.resume_text)?;

    let general = RoleProfile::general();
    let role = match request.target_role.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => registry
            .find(name)
            .ok_or_else(|| ScoringError::UnknownRole(name.to_string()))?,
        _ => &general,
    };

    let requirements = dedupe_requirements(&request.required_skills);
    let mut target: KeywordSet = requirements.iter().collect();
    target.merge(&build_target(role, request.job_description.as_deref()));

    let analysis = analyze(&document, &target, role)?;

    let (matched_requirements, missing_requirements): (Vec<String>, Vec<String>) = requirements
        .into_iter()
        .partition(|skill| contains_term(document.normalized(), &normalize(skill)));

    let skills_found: Vec<String> = TECH_SKILLS
        .iter()
        .filter(|skill| contains_term(document.normalized(), skill))
        .map(|skill| skill.to_string())
        .collect();

    let suggestions: Vec<String> = analysis
        .issues
        .iter()
        .map(|issue| issue.fix.clone())
        .chain(analysis.recommendations.iter().cloned())
        .collect();

    let stats = AtsStats {
        word_count: analysis.word_count,
        sentence_count: analysis.sentence_count,
        readability_score: (analysis.readability.score * 10.0).round() / 10.0,
        readability_label: analysis.readability.label.clone(),
        keyword_match_percent: analysis.breakdown.keywords,
        sections_found: analysis
            .sections
            .present()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    Ok(AtsReport {
        score: analysis.overall_score,
        grade: Grade::from_score(analysis.overall_score),
        breakdown: analysis.breakdown,
        skills_found,
        keywords_found: analysis.found_keywords,
        matched_requirements,
        missing_requirements,
        suggestions,
        stats,
    })
}

/// Trims and dedupes (case-insensitively) required skills, keeping the caller's casing.
fn dedupe_requirements(skills: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut kept = Vec::new();
    for skill in skills {
        let key = normalize(skill);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        kept.push(skill.trim().to_string());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "John Doe john@x.com (555) 123-4567. Experience: Software Engineer 2019-2023. • Built APIs. Skills: React, Node.js";

    fn request(resume: &str) -> AtsRequest {
        AtsRequest {
            resume_text: resume.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(80), Grade::A);
        assert_eq!(Grade::from_score(79), Grade::B);
        assert_eq!(Grade::from_score(70), Grade::B);
        assert_eq!(Grade::from_score(60), Grade::C);
        assert_eq!(Grade::from_score(50), Grade::D);
        assert_eq!(Grade::from_score(49), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_required_skills_partitioned() {
        let mut req = request(SAMPLE);
        req.required_skills = vec![
            "React".to_string(),
            "Python".to_string(),
            "react ".to_string(),
            "Node.js".to_string(),
        ];
        let report = build_report(&req, &RoleRegistry::predefined()).unwrap();
        assert_eq!(report.matched_requirements, vec!["React", "Node.js"]);
        assert_eq!(report.missing_requirements, vec!["Python"]);
        assert_eq!(report.keywords_found, vec!["react", "node.js"]);
    }

    #[test]
    fn test_skills_found_from_vocabulary() {
        let report = build_report(&request(SAMPLE), &RoleRegistry::predefined()).unwrap();
        assert!(report.skills_found.contains(&"react".to_string()));
        assert!(report.skills_found.contains(&"node.js".to_string()));
        assert!(!report.skills_found.contains(&"java".to_string()));
    }

    #[test]
    fn test_target_role_resolved_by_title() {
        let mut req = request(SAMPLE);
        req.target_role = Some("Frontend Developer".to_string());
        let report = build_report(&req, &RoleRegistry::predefined()).unwrap();
        assert!(report.keywords_found.contains(&"react".to_string()));
        assert_eq!(report.grade, Grade::from_score(report.score));
    }

    #[test]
    fn test_unknown_role_is_error() {
        let mut req = request(SAMPLE);
        req.target_role = Some("Astronaut".to_string());
        assert_eq!(
            build_report(&req, &RoleRegistry::predefined()).unwrap_err(),
            ScoringError::UnknownRole("Astronaut".to_string())
        );
    }

    #[test]
    fn test_empty_resume_is_error() {
        assert!(matches!(
            build_report(&request(" "), &RoleRegistry::predefined()),
            Err(ScoringError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_suggestions_lead_with_issue_fixes() {
        let report = build_report(&request(SAMPLE), &RoleRegistry::predefined()).unwrap();
        assert_eq!(
            report.suggestions[0],
            "Expand on your responsibilities, projects and measurable results."
        );
        assert!(report
            .suggestions
            .contains(&"Tailor your resume for each job application".to_string()));
        assert_eq!(report.stats.sections_found, vec!["contact", "experience", "skills"]);
    }
}
