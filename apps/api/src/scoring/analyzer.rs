//! Score aggregation. Turns the normalizer, keyword, section and readability
//! signals into one explainable `AnalysisResult`.
//!
//! Algorithm:
//! 1. keyword_pct = 100 × |found| / |target| (0 for an empty target)
//! 2. section_pct = 100 × present required sections / required sections
//! 3. score = round(clamp(keyword_pct × W.keywords + section_pct × (W.experience + W.education + W.skills)))
//! 4. Format penalties (length, readability) are diagnostic only.
//! 5. Issues come from a fixed rule table and are sorted by priority.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::error::ScoringError;
use crate::scoring::keywords::{extract_target_keywords, match_keywords, KeywordMatch, KeywordSet};
use crate::scoring::normalize::Document;
use crate::scoring::profiles::RoleProfile;
use crate::scoring::readability::{estimate, Readability};
use crate::scoring::sections::{
    detect_format_signals, detect_sections, FormatSignals, Section, SectionFlags,
};

pub const MIN_WORDS: usize = 200;
pub const MAX_WORDS: usize = 800;
/// Readability below this raises a warning and a format penalty.
pub const HARD_TO_READ: f64 = 30.0;
/// Readability at or above this counts as a strength.
pub const READABLE: f64 = 50.0;
/// Share of missing target keywords above which a warning is raised.
pub const MISSING_KEYWORD_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub fix: String,
    pub priority: u8,
}

impl Issue {
    fn new(severity: Severity, priority: u8, title: &str, description: String, fix: &str) -> Self {
        Self {
            severity,
            title: title.to_string(),
            description,
            fix: fix.to_string(),
            priority,
        }
    }
}

/// Two independent penalties in [0, 100]. Never folded into the overall score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatScore {
    pub length_penalty: u32,
    pub readability_penalty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keywords: u32,
    pub sections: u32,
    pub experience: u32,
    pub education: u32,
    pub skills: u32,
    pub format: FormatScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u32,
    pub breakdown: ScoreBreakdown,
    pub found_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub sections: SectionFlags,
    pub formatting: FormatSignals,
    pub issues: Vec<Issue>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
    pub readability: Readability,
    pub word_count: usize,
    pub sentence_count: usize,
    pub role_id: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Role keywords followed by keywords extracted from the job description. A
/// blank description is treated as absent.
pub fn build_target(role: &RoleProfile, job_description: Option<&str>) -> KeywordSet {
    let mut target: KeywordSet = role.keywords.iter().collect();
    if let Some(jd) = job_description.filter(|jd| !jd.trim().is_empty()) {
        if let Ok(extracted) = extract_target_keywords(jd) {
            target.merge(&extracted);
        }
    }
    target
}

/// Full pipeline from raw resume text.
pub fn analyze_resume(
    resume_text: &str,
    job_description: Option<&str>,
    role: &RoleProfile,
) -> Result<AnalysisResult, ScoringError> {
    let document = Document::new(resume_text)?;
    let target = build_target(role, job_description);
    analyze(&document, &target, role)
}

/// Aggregates every signal for `document` against `target` and `role`.
pub fn analyze(
    document: &Document,
    target: &KeywordSet,
    role: &RoleProfile,
) -> Result<AnalysisResult, ScoringError> {
    role.validate()?;

    let keyword_match = match_keywords(document.normalized(), target);
    let sections = detect_sections(document.raw());
    let formatting = detect_format_signals(document.raw());
    let readability = estimate(document.raw());
    let word_count = document.word_count();

    let keyword_pct = keyword_match.match_percent();
    let section_pct = section_completeness(&sections, role);
    let overall_score = (keyword_pct * role.weights.keywords
        + section_pct * role.weights.section_share())
    .clamp(0.0, 100.0)
    .round() as u32;

    let format = FormatScore {
        length_penalty: to_percent(length_penalty(word_count)),
        readability_penalty: to_percent(readability_penalty(readability.score)),
    };

    let breakdown = ScoreBreakdown {
        keywords: to_percent(keyword_pct / 100.0),
        sections: to_percent(section_pct / 100.0),
        experience: presence(sections.experience),
        education: presence(sections.education),
        skills: presence(sections.skills),
        format,
    };

    let issues = collect_issues(&sections, &formatting, &keyword_match, &readability, word_count, role);
    let strengths = collect_strengths(&sections, &formatting, keyword_pct, &readability, word_count);
    let recommendations = build_recommendations(&keyword_match.missing);

    debug!(
        role = %role.id,
        overall_score,
        keyword_pct,
        section_pct,
        word_count,
        issues = issues.len(),
        "Resume analyzed"
    );

    Ok(AnalysisResult {
        overall_score,
        breakdown,
        found_keywords: keyword_match.found,
        missing_keywords: keyword_match.missing,
        sections,
        formatting,
        issues,
        strengths,
        recommendations,
        readability,
        word_count,
        sentence_count: document.sentence_count(),
        role_id: role.id.clone(),
        analyzed_at: Utc::now(),
    })
}

/// Percentage of the role's required sections that are present. A role that
/// requires nothing is complete.
fn section_completeness(sections: &SectionFlags, role: &RoleProfile) -> f64 {
    if role.required_sections.is_empty() {
        return 100.0;
    }
    let present = role
        .required_sections
        .iter()
        .filter(|s| sections.has(**s))
        .count();
    100.0 * present as f64 / role.required_sections.len() as f64
}

/// Fraction in [0, 1] by which the word count falls outside [MIN_WORDS, MAX_WORDS].
pub fn length_penalty(word_count: usize) -> f64 {
    if word_count < MIN_WORDS {
        (MIN_WORDS - word_count) as f64 / MIN_WORDS as f64
    } else if word_count > MAX_WORDS {
        ((word_count - MAX_WORDS) as f64 / MAX_WORDS as f64).min(1.0)
    } else {
        0.0
    }
}

/// Fraction in [0, 1] by which readability falls below `HARD_TO_READ`.
pub fn readability_penalty(score: f64) -> f64 {
    ((HARD_TO_READ - score) / HARD_TO_READ).clamp(0.0, 1.0)
}

fn to_percent(fraction: f64) -> u32 {
    (fraction * 100.0).clamp(0.0, 100.0).round() as u32
}

fn presence(present: bool) -> u32 {
    if present {
        100
    } else {
        0
    }
}

fn collect_issues(
    sections: &SectionFlags,
    formatting: &FormatSignals,
    keyword_match: &KeywordMatch,
    readability: &Readability,
    word_count: usize,
    role: &RoleProfile,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !sections.contact {
        issues.push(Issue::new(
            Severity::Critical,
            1,
            "Missing Contact Information",
            "No email address, phone number or LinkedIn profile was found.".to_string(),
            "Add your email, phone number and LinkedIn URL at the top of the resume.",
        ));
    }
    if !sections.experience {
        issues.push(Issue::new(
            Severity::Critical,
            1,
            "Missing Work Experience Section",
            "ATS systems look for a clearly labelled experience section with roles and dates."
                .to_string(),
            "Add a \"Work Experience\" section listing job titles, employers and dates.",
        ));
    }
    if word_count < MIN_WORDS {
        issues.push(Issue::new(
            Severity::Critical,
            2,
            "Resume Too Short",
            format!("Your resume has {word_count} words; aim for {MIN_WORDS}-{MAX_WORDS}."),
            "Expand on your responsibilities, projects and measurable results.",
        ));
    }
    let target_len = keyword_match.found.len() + keyword_match.missing.len();
    if target_len > 0
        && keyword_match.missing.len() as f64 / target_len as f64 > MISSING_KEYWORD_RATIO
    {
        issues.push(Issue::new(
            Severity::Warning,
            3,
            "Low Keyword Match",
            format!(
                "{} of {} target keywords are missing from your resume.",
                keyword_match.missing.len(),
                target_len
            ),
            "Mirror the job description's terminology wherever it honestly describes your experience.",
        ));
    }
    if !sections.skills {
        issues.push(Issue::new(
            Severity::Warning,
            4,
            "Missing Skills Section",
            "No dedicated skills section or recognizable technical skills were found.".to_string(),
            "Add a \"Skills\" section listing tools, languages and frameworks you use.",
        ));
    }
    if readability.score < HARD_TO_READ {
        issues.push(Issue::new(
            Severity::Warning,
            5,
            "Hard to Read",
            format!(
                "Readability score is {:.0} ({}).",
                readability.score, readability.label
            ),
            "Use shorter sentences and plainer words.",
        ));
    }
    if !sections.summary {
        issues.push(Issue::new(
            Severity::Suggestion,
            6,
            "Add a Professional Summary",
            "A short summary helps recruiters understand your profile at a glance.".to_string(),
            "Open with 2-3 sentences describing your experience and goals.",
        ));
    }
    if !sections.education && role.requires(Section::Education) {
        issues.push(Issue::new(
            Severity::Suggestion,
            7,
            "Add Education Section",
            format!("The {} role expects an education section.", role.title),
            "List your degrees, institutions and graduation years.",
        ));
    }
    if !formatting.quantified_achievements {
        issues.push(Issue::new(
            Severity::Suggestion,
            8,
            "Quantify Your Impact",
            "No measurable results (percentages, amounts, counts) were found.".to_string(),
            "Add numbers to your achievements, e.g. \"reduced load time by 40%\".",
        ));
    }

    issues.sort_by_key(|i| i.priority);
    issues
}

fn collect_strengths(
    sections: &SectionFlags,
    formatting: &FormatSignals,
    keyword_pct: f64,
    readability: &Readability,
    word_count: usize,
) -> Vec<String> {
    let mut strengths = Vec::new();

    if sections.contact {
        strengths.push("Contact information is easy to find".to_string());
    }
    if sections.experience {
        strengths.push("Includes a work experience section".to_string());
    }
    if (MIN_WORDS..=MAX_WORDS).contains(&word_count) {
        strengths.push(format!(
            "Resume length is in the ideal range ({MIN_WORDS}-{MAX_WORDS} words)"
        ));
    }
    if keyword_pct >= 50.0 {
        strengths.push(format!("Matches {keyword_pct:.0}% of target keywords"));
    }
    if sections.skills {
        strengths.push("Lists relevant skills".to_string());
    }
    if readability.score >= READABLE {
        strengths.push(format!("Clear, readable writing ({})", readability.label));
    }
    if sections.summary {
        strengths.push("Opens with a professional summary".to_string());
    }
    if sections.education {
        strengths.push("Includes education details".to_string());
    }
    if formatting.quantified_achievements {
        strengths.push("Quantifies achievements with numbers".to_string());
    }
    if formatting.bullet_points {
        strengths.push("Uses bullet points for scannable content".to_string());
    }

    strengths
}

fn build_recommendations(missing: &[String]) -> Vec<String> {
    let mut recommendations = vec![
        "Tailor your resume for each job application".to_string(),
        "Start bullet points with strong action verbs".to_string(),
        "Quantify your impact with concrete numbers".to_string(),
    ];
    if !missing.is_empty() {
        let top: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();
        recommendations.push(format!(
            "Consider adding these keywords: {}",
            top.join(", ")
        ));
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::profiles::ScoringWeights;

    const SAMPLE: &str = "John Doe john@x.com (555) 123-4567. Experience: Software Engineer 2019-2023. • Built APIs. Skills: React, Node.js";

    fn role_with(keywords: &[&str]) -> RoleProfile {
        let mut role = RoleProfile::general();
        role.keywords = keywords.iter().map(|k| k.to_string()).collect();
        role
    }

    fn words(n: usize) -> String {
        (0..n).map(|_| "word").collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_sample_resume_scenario() {
        let role = role_with(&["React", "Node.js", "Python"]);
        let result = analyze_resume(SAMPLE, None, &role).unwrap();

        assert_eq!(result.found_keywords, vec!["react", "node.js"]);
        assert_eq!(result.missing_keywords, vec!["python"]);
        assert!(result.sections.contact);
        assert!(result.sections.experience);
        assert!(result.formatting.bullet_points);
        assert!(result.overall_score > 0);
    }

    #[test]
    fn test_sample_resume_score_formula() {
        // keywords 2/3 → 66.67 × 0.4 = 26.67; sections 3/3 → 100 × 0.6 = 60
        let role = role_with(&["React", "Node.js", "Python"]);
        let result = analyze_resume(SAMPLE, None, &role).unwrap();
        assert_eq!(result.overall_score, 87);
        assert_eq!(result.breakdown.keywords, 67);
        assert_eq!(result.breakdown.sections, 100);
    }

    #[test]
    fn test_empty_resume_is_rejected() {
        let err = analyze_resume("   ", None, &RoleProfile::general()).unwrap_err();
        assert_eq!(err, ScoringError::EmptyInput("resume text"));
    }

    #[test]
    fn test_invalid_role_weights_rejected() {
        let mut role = RoleProfile::general();
        role.weights = ScoringWeights {
            keywords: 1.0,
            experience: 1.0,
            education: 0.0,
            skills: 0.0,
        };
        assert!(matches!(
            analyze_resume(SAMPLE, None, &role),
            Err(ScoringError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_short_resume_flags_critical_and_penalizes_format() {
        let text = format!("{} john@x.com", words(49));
        let result = analyze_resume(&text, None, &RoleProfile::general()).unwrap();
        assert_eq!(result.word_count, 50);

        let short = result
            .issues
            .iter()
            .find(|i| i.title == "Resume Too Short")
            .expect("short resume issue");
        assert_eq!(short.severity, Severity::Critical);
        assert_eq!(short.priority, 2);
        assert_eq!(result.breakdown.format.length_penalty, 75);
    }

    #[test]
    fn test_issues_sorted_by_priority() {
        let result = analyze_resume("hello", Some("Kubernetes Terraform AWS"), &RoleProfile::general())
            .unwrap();
        assert!(!result.issues.is_empty());
        assert!(result
            .issues
            .windows(2)
            .all(|pair| pair[0].priority <= pair[1].priority));
        assert_eq!(result.issues[0].severity, Severity::Critical);
    }

    #[test]
    fn test_empty_target_still_scores_within_bounds() {
        let result = analyze_resume(SAMPLE, None, &RoleProfile::general()).unwrap();
        assert!(result.found_keywords.is_empty());
        assert!(result.missing_keywords.is_empty());
        assert_eq!(result.breakdown.keywords, 0);
        assert!(result.overall_score <= 100);
        assert!(!result.issues.iter().any(|i| i.title == "Low Keyword Match"));
    }

    #[test]
    fn test_low_keyword_match_warning() {
        let role = role_with(&["rust", "kafka", "terraform", "react"]);
        let result = analyze_resume(SAMPLE, None, &role).unwrap();
        // 3 of 4 missing = 75% > 60%
        let warning = result
            .issues
            .iter()
            .find(|i| i.title == "Low Keyword Match")
            .expect("low keyword warning");
        assert_eq!(warning.priority, 3);
        assert_eq!(warning.severity, Severity::Warning);
    }

    #[test]
    fn test_education_issue_only_when_role_requires_it() {
        let general = analyze_resume(SAMPLE, None, &RoleProfile::general()).unwrap();
        assert!(!general.issues.iter().any(|i| i.priority == 7));

        let mut role = RoleProfile::general();
        role.required_sections.push(Section::Education);
        let strict = analyze_resume(SAMPLE, None, &role).unwrap();
        assert!(strict.issues.iter().any(|i| i.title == "Add Education Section"));
    }

    #[test]
    fn test_job_description_keywords_join_target() {
        let role = role_with(&["python"]);
        let result = analyze_resume(
            SAMPLE,
            Some("We need a React developer with AWS and Docker experience"),
            &role,
        )
        .unwrap();
        assert!(result.found_keywords.contains(&"react".to_string()));
        assert!(result.missing_keywords.contains(&"python".to_string()));
        assert!(result.missing_keywords.contains(&"aws".to_string()));
    }

    #[test]
    fn test_blank_job_description_is_ignored() {
        let role = role_with(&["react"]);
        let result = analyze_resume(SAMPLE, Some("   "), &role).unwrap();
        assert_eq!(result.found_keywords, vec!["react"]);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_recommendations_list_top_three_missing() {
        let role = role_with(&["go", "rust", "kafka", "terraform"]);
        let result = analyze_resume(SAMPLE, None, &role).unwrap();
        let last = result.recommendations.last().unwrap();
        assert_eq!(last, "Consider adding these keywords: go, rust, kafka");
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_no_dynamic_recommendation_when_nothing_missing() {
        let role = role_with(&["react"]);
        let result = analyze_resume(SAMPLE, None, &role).unwrap();
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn test_length_penalty_bands() {
        assert_eq!(length_penalty(0), 1.0);
        assert_eq!(length_penalty(200), 0.0);
        assert_eq!(length_penalty(800), 0.0);
        assert_eq!(length_penalty(1200), 0.5);
        assert_eq!(length_penalty(5000), 1.0);
    }

    #[test]
    fn test_readability_penalty_bands() {
        assert_eq!(readability_penalty(30.0), 0.0);
        assert_eq!(readability_penalty(80.0), 0.0);
        assert_eq!(readability_penalty(15.0), 0.5);
        assert_eq!(readability_penalty(0.0), 1.0);
    }

    #[test]
    fn test_well_formed_resume_has_strengths() {
        let body = "I built reliable services for 300 customers. I led a small team well. ".repeat(20);
        let text = format!(
            "Summary\nBackend engineer.\n\nContact\njane@mail.com\n\nExperience\nSenior Developer 2018-2024\n{body}\n\nEducation\nBachelor of Science\n\nSkills\nRust, Python, AWS"
        );
        let result = analyze_resume(&text, None, &RoleProfile::general()).unwrap();
        assert!(result.word_count >= MIN_WORDS);
        assert!(result.strengths.iter().any(|s| s.starts_with("Resume length")));
        assert!(result.strengths.contains(&"Quantifies achievements with numbers".to_string()));
        assert_eq!(result.breakdown.format.length_penalty, 0);
        assert!(!result.issues.iter().any(|i| i.severity == Severity::Critical));
    }
}
