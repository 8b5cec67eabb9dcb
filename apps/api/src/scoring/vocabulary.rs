//! Fixed word lists used by the heuristics. All entries are lowercase.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Technical-skill vocabulary. Drives skills-section detection, the
/// "technical" ranking tier in keyword extraction, and `skillsFound` in ATS
/// reports.
pub const TECH_SKILLS: &[&str] = &[
    // languages
    "javascript",
    "typescript",
    "python",
    "java",
    "kotlin",
    "swift",
    "rust",
    "golang",
    "ruby",
    "php",
    "scala",
    "c++",
    "c#",
    "sql",
    "html",
    "css",
    // frameworks and runtimes
    "react",
    "angular",
    "vue",
    "svelte",
    "next.js",
    "node.js",
    "express",
    "django",
    "flask",
    "fastapi",
    "spring",
    "rails",
    "laravel",
    ".net",
    "graphql",
    "redux",
    "tailwind",
    // data and infrastructure
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "kafka",
    "elasticsearch",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "jenkins",
    "linux",
    "git",
    "ci/cd",
    "microservices",
    "rest",
    // data science
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "machine learning",
    "deep learning",
    "data analysis",
    "statistics",
    "tableau",
    "power bi",
    "spark",
    // design and product
    "figma",
    "sketch",
    "photoshop",
    "wireframing",
    "prototyping",
    "user research",
    "agile",
    "scrum",
    "jira",
    "roadmapping",
];

/// Strong verbs that open achievement bullets.
pub const ACTION_VERBS: &[&str] = &[
    "achieved",
    "built",
    "created",
    "delivered",
    "designed",
    "developed",
    "drove",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "optimized",
    "reduced",
    "shipped",
    "streamlined",
];

/// Job-posting filler that carries no matching signal, on top of the generic
/// English stop-word list.
const POSTING_FILLER: &[&str] = &[
    "need",
    "needs",
    "looking",
    "seeking",
    "join",
    "ideal",
    "candidate",
    "candidates",
    "role",
    "position",
    "responsibilities",
    "requirements",
    "required",
    "preferred",
    "plus",
    "ability",
    "strong",
    "excellent",
    "years",
    "work",
    "working",
    "team",
    "company",
    "including",
    "experience",
];

static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut words: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect();
    words.extend(POSTING_FILLER.iter().map(|w| w.to_string()));
    words
});

static TECH_SKILL_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TECH_SKILLS.iter().copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// True when the (lowercase) token is a single-word vocabulary skill.
pub fn is_tech_skill(token: &str) -> bool {
    TECH_SKILL_SET.contains(token)
}

/// Vocabulary entries spanning more than one word, e.g. "machine learning".
pub fn multi_word_skills() -> impl Iterator<Item = &'static str> {
    TECH_SKILLS.iter().copied().filter(|s| s.contains(' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_are_lowercase() {
        for term in TECH_SKILLS.iter().chain(ACTION_VERBS) {
            assert_eq!(*term, term.to_lowercase(), "{term} is not lowercase");
        }
    }

    #[test]
    fn test_posting_filler_is_stop_word() {
        assert!(is_stop_word("need"));
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("docker"));
    }

    #[test]
    fn test_multi_word_skills() {
        let multi: Vec<_> = multi_word_skills().collect();
        assert!(multi.contains(&"machine learning"));
        assert!(!multi.contains(&"react"));
    }
}
