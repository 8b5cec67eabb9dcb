//! Flesch Reading Ease approximation with a deliberately crude syllable count.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub score: f64,
    pub label: String,
}

/// Label for a reading-ease score. Each band's lower bound is inclusive.
pub fn label_for(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "Very Easy",
        s if s >= 80.0 => "Easy",
        s if s >= 70.0 => "Fairly Easy",
        s if s >= 60.0 => "Standard",
        s if s >= 50.0 => "Fairly Difficult",
        s if s >= 30.0 => "Difficult",
        _ => "Very Difficult",
    }
}

/// Vowel count with a floor of one. Not phonetic.
pub fn syllables(word: &str) -> usize {
    word.chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y'))
        .count()
        .max(1)
}

pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Estimates reading ease of `text`, clamped to [0, 100].
pub fn estimate(text: &str) -> Readability {
    let sentences = sentence_count(text);
    let words: Vec<&str> = text.split_whitespace().collect();

    let score = if sentences == 0 || words.is_empty() {
        0.0
    } else {
        let word_count = words.len() as f64;
        let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();
        (206.835
            - 1.015 * (word_count / sentences as f64)
            - 84.6 * (syllable_count as f64 / word_count))
            .clamp(0.0, 100.0)
    };

    Readability {
        score,
        label: label_for(score).to_string(),
    }
}
