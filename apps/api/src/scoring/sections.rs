//! Resume section detection and formatting signals.
//!
//! A section counts as present when its heading appears (on its own line or
//! followed by a colon) or when the text carries that section's content
//! signature. The five checks are independent.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::keywords::contains_term;
use crate::scoring::normalize::normalize;
use crate::scoring::vocabulary::{ACTION_VERBS, TECH_SKILLS};

/// Standard resume sections a role profile can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Contact,
    Experience,
    Education,
    Skills,
    Summary,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Contact,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Summary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFlags {
    pub contact: bool,
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub summary: bool,
}

impl SectionFlags {
    pub fn has(&self, section: Section) -> bool {
        match section {
            Section::Contact => self.contact,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Skills => self.skills,
            Section::Summary => self.summary,
        }
    }

    /// Labels of every present section, in `Section::ALL` order.
    pub fn present(&self) -> Vec<&'static str> {
        Section::ALL
            .into_iter()
            .filter(|s| self.has(*s))
            .map(Section::label)
            .collect()
    }
}

/// Layout cues that are not sections but still affect how a resume reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSignals {
    pub bullet_points: bool,
    pub quantified_achievements: bool,
    pub action_verb_count: usize,
}

fn heading(words: &str) -> Regex {
    let pattern = format!(r"(?im)(?:^[ \t]*(?:{words})[ \t]*:?[ \t]*$)|(?:\b(?:{words})[ \t]*:)");
    Regex::new(&pattern).unwrap()
}

static CONTACT_HEADING: LazyLock<Regex> =
    LazyLock::new(|| heading("contact(?: information| details| info)?|personal details"));
static EXPERIENCE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    heading("(?:work |professional |relevant )?experience|employment(?: history)?|work history")
});
static EDUCATION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| heading("education(?:al background)?|academic background|qualifications"));
static SKILLS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    heading("(?:technical |core |key )?skills|competencies|technologies|tech stack")
});
static SUMMARY_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    heading("(?:professional |career )?(?:summary|objective|profile)|about me")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").unwrap()
});
static LINKEDIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[A-Za-z0-9_-]+").unwrap());
static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static ROLE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:developer|engineer|manager|analyst|designer|consultant|architect|intern|specialist|administrator|scientist|lead)s?\b",
    )
    .unwrap()
});
static DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor(?:'s)?|master(?:'s)?|ph\.?d|mba|b\.?sc?|m\.?sc?|b\.?tech|m\.?tech|b\.a|m\.a|degree|diploma|university|college|institute|school of)\b",
    )
    .unwrap()
});
static SUMMARY_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:summary|objective|profile)\b").unwrap());

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^[ \t]*(?:[-*▪◦●]|\d+[.)])[ \t]+)|[•▪◦●]").unwrap());
static QUANTIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\d+(?:\.\d+)?\s*(?:%|x\b|k\b|\+))|(?:[$€£]\s?\d)|(?:\b\d+\s+(?:users|customers|clients|people|engineers|projects|teams|hours|days|weeks|months|requests)\b)",
    )
    .unwrap()
});

/// Detects which standard sections a resume contains.
pub fn detect_sections(raw_text: &str) -> SectionFlags {
    let normalized = normalize(raw_text);

    SectionFlags {
        contact: CONTACT_HEADING.is_match(raw_text)
            || EMAIL.is_match(raw_text)
            || PHONE.is_match(raw_text)
            || LINKEDIN.is_match(raw_text),
        experience: EXPERIENCE_HEADING.is_match(raw_text)
            || (YEAR.is_match(raw_text) && ROLE_TITLE.is_match(raw_text)),
        education: EDUCATION_HEADING.is_match(raw_text) || DEGREE.is_match(raw_text),
        skills: SKILLS_HEADING.is_match(raw_text)
            || TECH_SKILLS.iter().any(|s| contains_term(&normalized, s)),
        summary: SUMMARY_HEADING.is_match(raw_text) || SUMMARY_WORD.is_match(raw_text),
    }
}

/// Bullets, quantified results and action verbs.
pub fn detect_format_signals(raw_text: &str) -> FormatSignals {
    let normalized = normalize(raw_text);
    let action_verb_count = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| ACTION_VERBS.contains(w))
        .count();

    FormatSignals {
        bullet_points: BULLET.is_match(raw_text),
        quantified_achievements: QUANTIFIED.is_match(raw_text),
        action_verb_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "John Doe john@x.com (555) 123-4567. Experience: Software Engineer 2019-2023. • Built APIs. Skills: React, Node.js";

    #[test]
    fn test_sample_resume_sections() {
        let flags = detect_sections(SAMPLE);
        assert!(flags.contact);
        assert!(flags.experience);
        assert!(flags.skills);
        assert!(!flags.education);
        assert!(!flags.summary);
    }

    #[test]
    fn test_sample_resume_has_bullets() {
        let signals = detect_format_signals(SAMPLE);
        assert!(signals.bullet_points);
        assert_eq!(signals.action_verb_count, 1);
    }

    #[test]
    fn test_headings_on_their_own_line() {
        let text = "CONTACT\nsomewhere\n\nWork Experience\nstuff\n\nEducation\nstuff\n\nTechnical Skills\nstuff\n\nProfessional Summary\nstuff";
        let flags = detect_sections(text);
        assert_eq!(
            flags,
            SectionFlags {
                contact: true,
                experience: true,
                education: true,
                skills: true,
                summary: true,
            }
        );
    }

    #[test]
    fn test_contact_signatures_independent() {
        assert!(detect_sections("reach me at jane.doe+cv@mail.example.org").contact);
        assert!(detect_sections("call +1 555-123-4567").contact);
        assert!(detect_sections("linkedin.com/in/jane-doe").contact);
        assert!(!detect_sections("no way to reach me").contact);
    }

    #[test]
    fn test_experience_needs_year_and_title() {
        assert!(detect_sections("Backend Developer at Acme, 2021").experience);
        assert!(!detect_sections("Backend Developer at Acme").experience);
        assert!(!detect_sections("Graduated in 2021").experience);
    }

    #[test]
    fn test_education_from_degree_keywords() {
        assert!(detect_sections("Bachelor of Science, State University").education);
        assert!(detect_sections("PhD in physics").education);
    }

    #[test]
    fn test_skills_from_vocabulary_uses_word_boundaries() {
        assert!(detect_sections("comfortable with kubernetes").skills);
        assert!(!detect_sections("javascripting is not a word").skills);
    }

    #[test]
    fn test_summary_literal_word() {
        assert!(detect_sections("my profile: backend person").summary);
        assert!(!detect_sections("backend person").summary);
    }

    #[test]
    fn test_quantified_achievements() {
        assert!(detect_format_signals("Cut latency by 40%").quantified_achievements);
        assert!(detect_format_signals("Saved $2M yearly").quantified_achievements);
        assert!(detect_format_signals("Onboarded 300 customers").quantified_achievements);
        assert!(!detect_format_signals("Made things faster").quantified_achievements);
    }

    #[test]
    fn test_present_lists_labels_in_order() {
        let flags = SectionFlags {
            contact: true,
            skills: true,
            ..Default::default()
        };
        assert_eq!(flags.present(), vec!["contact", "skills"]);
    }
}
