//! Keyword extraction from job descriptions and word-boundary keyword matching.
//!
//! Extraction works in two pools:
//! 1. Technical tokens, found by pattern class (CamelCase, acronyms, dotted
//!    identifiers, hyphen/underscore compounds) or by vocabulary lookup.
//! 2. Plain words from whatever text remains, minus stop-words, digits and
//!    tokens of length <= 2.
//!
//! Both pools feed one frequency table. Technical tokens always outrank plain
//! words; inside a tier, higher frequency wins and first appearance breaks ties.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::error::ScoringError;
use crate::scoring::normalize::normalize;
use crate::scoring::vocabulary::{is_stop_word, is_tech_skill, multi_word_skills};

/// Upper bound on the size of any target keyword set.
pub const MAX_KEYWORDS: usize = 40;

static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+[A-Z][A-Za-z]*\b").unwrap());
static ACRONYM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}\b").unwrap());
static DOTTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z][A-Za-z0-9]*(?:\.[A-Za-z][A-Za-z0-9]+)+\b").unwrap()
});
static COMPOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z][A-Za-z0-9]*(?:[-_][A-Za-z0-9]+)+\b").unwrap());

/// Deduplicated, lowercase, capped set of target terms. Insertion order is kept
/// for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term after normalizing it. Blank terms, duplicates and anything
    /// past `MAX_KEYWORDS` are ignored. Returns whether the term was added.
    pub fn insert(&mut self, term: &str) -> bool {
        let term = normalize(term);
        if term.is_empty() || self.terms.len() >= MAX_KEYWORDS || self.contains(&term) {
            return false;
        }
        self.terms.push(term);
        true
    }

    /// Appends every term of `other` that is not already present.
    pub fn merge(&mut self, other: &KeywordSet) {
        for term in &other.terms {
            self.insert(term);
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        for term in iter {
            set.insert(term.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(terms: Vec<String>) -> Self {
        terms.into_iter().collect()
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.terms
    }
}

/// Partition of a target set into terms present and absent in a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl KeywordMatch {
    /// Percentage of the target that was found. 0 for an empty target.
    pub fn match_percent(&self) -> f64 {
        let total = self.found.len() + self.missing.len();
        if total == 0 {
            0.0
        } else {
            100.0 * self.found.len() as f64 / total as f64
        }
    }
}

#[derive(Debug)]
struct Candidate {
    technical: bool,
    frequency: u32,
    first_seen: usize,
}

#[derive(Default)]
struct FrequencyTable {
    entries: HashMap<String, Candidate>,
}

impl FrequencyTable {
    fn record(&mut self, token: String, technical: bool, position: usize) {
        let entry = self.entries.entry(token).or_insert(Candidate {
            technical,
            frequency: 0,
            first_seen: position,
        });
        entry.frequency += 1;
        entry.technical |= technical;
        entry.first_seen = entry.first_seen.min(position);
    }

    fn into_ranked(self) -> Vec<String> {
        let mut ranked: Vec<(String, Candidate)> = self.entries.into_iter().collect();
        ranked.sort_by_key(|(_, c)| c.first_seen);
        // stable: equal tier and frequency keep first-appearance order
        ranked.sort_by(|(_, a), (_, b)| {
            b.technical
                .cmp(&a.technical)
                .then(b.frequency.cmp(&a.frequency))
        });
        ranked.into_iter().map(|(token, _)| token).collect()
    }
}

/// Derives up to `MAX_KEYWORDS` target keywords from free text such as a job
/// description.
pub fn extract_target_keywords(text: &str) -> Result<KeywordSet, ScoringError> {
    if text.trim().is_empty() {
        return Err(ScoringError::EmptyInput("job description"));
    }

    let mut table = FrequencyTable::default();
    let mut remaining = text.to_string();

    for (start, end) in technical_spans(text) {
        let raw = &text[start..end];
        let token = raw.to_lowercase();
        let is_acronym = raw.chars().all(|c| c.is_ascii_uppercase());
        if !(is_acronym && is_stop_word(&token)) {
            table.record(token, true, start);
        }
        blank(&mut remaining, start, end);
    }

    // ASCII folding keeps byte offsets stable for positions and blanking
    let mut remaining = remaining.to_ascii_lowercase();

    for phrase in multi_word_skills() {
        for (start, end) in find_term(&remaining, phrase) {
            table.record(phrase.to_string(), true, start);
            blank(&mut remaining, start, end);
        }
    }

    for (position, token) in plain_tokens(&remaining) {
        let token = token.to_lowercase();
        if is_tech_skill(&token) {
            table.record(token, true, position);
            continue;
        }
        if token.chars().count() <= 2
            || token.chars().all(|c| c.is_ascii_digit())
            || is_stop_word(&token)
        {
            continue;
        }
        table.record(token, false, position);
    }

    Ok(table.into_ranked().into_iter().collect())
}

/// Splits `target` into found and missing terms using word-boundary matching
/// against an already normalized document.
pub fn match_keywords(normalized_document: &str, target: &KeywordSet) -> KeywordMatch {
    let (found, missing): (Vec<String>, Vec<String>) = target
        .iter()
        .map(str::to_string)
        .partition(|term| contains_term(normalized_document, term));
    KeywordMatch { found, missing }
}

/// True when `term` occurs in `haystack` with no alphanumeric character
/// directly before or after it. "java" does not occur in "javascript".
pub fn contains_term(haystack: &str, term: &str) -> bool {
    !find_term(haystack, term).is_empty()
}

fn find_term(haystack: &str, term: &str) -> Vec<(usize, usize)> {
    if term.is_empty() {
        return Vec::new();
    }
    haystack
        .match_indices(term)
        .map(|(start, m)| (start, start + m.len()))
        .filter(|&(start, end)| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .collect()
}

/// Leftmost-longest, non-overlapping spans of every technical pattern class.
fn technical_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = [&*CAMEL_CASE, &*ACRONYM, &*DOTTED, &*COMPOUND]
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
        .collect();
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut kept: Vec<(usize, usize)> = Vec::new();
    for span in spans {
        if kept.last().is_some_and(|last| span.0 < last.1) {
            continue;
        }
        kept.push(span);
    }
    kept
}

fn plain_tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .map(move |t| (t.as_ptr() as usize - text.as_ptr() as usize, t))
}

fn blank(text: &mut String, start: usize, end: usize) {
    let spaces = " ".repeat(text[start..end].len());
    text.replace_range(start..end, &spaces);
}
