//! Role profiles and the caller-owned registry that holds them.
//!
//! Weights are validated once, when a profile enters the registry (or is built
//! with `RoleProfile::new`). Scoring code assumes validated weights.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::error::ScoringError;
use crate::scoring::sections::Section;

/// Allowed deviation of a weight tuple's sum from 1.0.
pub const WEIGHT_EPSILON: f64 = 1e-3;

pub const GENERAL_ROLE_ID: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keywords: f64,
    pub experience: f64,
    pub education: f64,
    pub skills: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keywords: 0.4,
            experience: 0.3,
            education: 0.15,
            skills: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.keywords + self.experience + self.education + self.skills
    }

    /// Share of the total applied to section completeness.
    pub fn section_share(&self) -> f64 {
        self.experience + self.education + self.skills
    }

    pub fn validate(&self, role: &str) -> Result<(), ScoringError> {
        let all_finite_non_negative = [self.keywords, self.experience, self.education, self.skills]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        if !all_finite_non_negative || (self.sum() - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ScoringError::InvalidWeights {
                role: role.to_string(),
                sum: self.sum(),
            });
        }
        Ok(())
    }
}

fn default_required_sections() -> Vec<Section> {
    vec![Section::Contact, Section::Experience, Section::Skills]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfile {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_required_sections")]
    pub required_sections: Vec<Section>,
    #[serde(default)]
    pub weights: ScoringWeights,
}

impl RoleProfile {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        keywords: &[&str],
        required_sections: Vec<Section>,
        weights: ScoringWeights,
    ) -> Result<Self, ScoringError> {
        let profile = Self {
            id: id.into(),
            title: title.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            required_sections,
            weights,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Profile used when the caller names no role: no role keywords, default
    /// weights and required sections.
    pub fn general() -> Self {
        Self {
            id: GENERAL_ROLE_ID.to_string(),
            title: "General".to_string(),
            keywords: Vec::new(),
            required_sections: default_required_sections(),
            weights: ScoringWeights::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        self.weights.validate(&self.id)
    }

    pub fn requires(&self, section: Section) -> bool {
        self.required_sections.contains(&section)
    }
}

/// Predefined plus custom role profiles for one session or process.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    predefined: Vec<RoleProfile>,
    custom: Vec<RoleProfile>,
}

impl RoleRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn predefined() -> Self {
        Self {
            predefined: predefined_profiles(),
            custom: Vec::new(),
        }
    }

    /// Validates and adds a custom profile, assigning an id when none is given.
    /// Returns the stored id.
    pub fn insert_custom(&mut self, mut profile: RoleProfile) -> Result<String, ScoringError> {
        if profile.id.trim().is_empty() {
            profile.id = format!("custom-{}", Uuid::new_v4());
        }
        profile.validate()?;
        if self.get(&profile.id).is_some() {
            return Err(ScoringError::DuplicateRole(profile.id));
        }
        let id = profile.id.clone();
        self.custom.push(profile);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&RoleProfile> {
        self.list().find(|p| p.id == id)
    }

    /// Looks a role up by id or title, ignoring case.
    pub fn find(&self, id_or_title: &str) -> Option<&RoleProfile> {
        let needle = id_or_title.trim();
        self.list()
            .find(|p| p.id.eq_ignore_ascii_case(needle) || p.title.eq_ignore_ascii_case(needle))
    }

    pub fn list(&self) -> impl Iterator<Item = &RoleProfile> {
        self.predefined.iter().chain(self.custom.iter())
    }

    pub fn len(&self) -> usize {
        self.predefined.len() + self.custom.len()
    }

    /// Reads a JSON array of custom profiles from `path` into the registry.
    pub fn load_custom_file(&mut self, path: &Path) -> Result<usize> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read role profiles from {}", path.display()))?;
        let profiles: Vec<RoleProfile> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid role profile JSON in {}", path.display()))?;
        let count = profiles.len();
        for profile in profiles {
            self.insert_custom(profile)?;
        }
        Ok(count)
    }
}

fn profile(id: &str, title: &str, keywords: &[&str], required: &[Section], w: [f64; 4]) -> RoleProfile {
    RoleProfile {
        id: id.to_string(),
        title: title.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        required_sections: required.to_vec(),
        weights: ScoringWeights {
            keywords: w[0],
            experience: w[1],
            education: w[2],
            skills: w[3],
        },
    }
}

fn predefined_profiles() -> Vec<RoleProfile> {
    use Section::*;
    vec![
        profile(
            "software-engineer",
            "Software Engineer",
            &["javascript", "python", "java", "sql", "git", "rest", "docker", "aws", "agile", "testing"],
            &[Contact, Experience, Skills],
            [0.4, 0.3, 0.15, 0.15],
        ),
        profile(
            "frontend-developer",
            "Frontend Developer",
            &["javascript", "typescript", "react", "html", "css", "redux", "responsive", "accessibility", "webpack", "git"],
            &[Contact, Experience, Skills],
            [0.45, 0.25, 0.1, 0.2],
        ),
        profile(
            "backend-developer",
            "Backend Developer",
            &["node.js", "python", "java", "sql", "postgresql", "redis", "microservices", "rest", "docker", "aws"],
            &[Contact, Experience, Skills],
            [0.4, 0.3, 0.1, 0.2],
        ),
        profile(
            "data-scientist",
            "Data Scientist",
            &["python", "sql", "machine learning", "statistics", "pandas", "numpy", "tensorflow", "pytorch", "data analysis", "tableau"],
            &[Contact, Experience, Education, Skills],
            [0.35, 0.25, 0.25, 0.15],
        ),
        profile(
            "devops-engineer",
            "DevOps Engineer",
            &["aws", "docker", "kubernetes", "terraform", "ci/cd", "linux", "jenkins", "ansible", "monitoring", "git"],
            &[Contact, Experience, Skills],
            [0.45, 0.3, 0.05, 0.2],
        ),
        profile(
            "product-manager",
            "Product Manager",
            &["roadmapping", "stakeholder", "agile", "scrum", "jira", "user research", "analytics", "prioritization", "strategy", "metrics"],
            &[Contact, Experience, Summary],
            [0.4, 0.35, 0.15, 0.1],
        ),
        profile(
            "ui-ux-designer",
            "UI/UX Designer",
            &["figma", "sketch", "wireframing", "prototyping", "user research", "usability", "design systems", "photoshop", "accessibility", "interaction design"],
            &[Contact, Experience, Skills],
            [0.4, 0.3, 0.1, 0.2],
        ),
    ]
}
