//! Intensity inference shared by both interpreters.
//!
//! Severity words win first (High > Medium > Low). Without any, modal verbs
//! decide: obligations read as High, advice as Medium, the rest as Low.

use regex::Regex;
use std::sync::LazyLock;

use super::patterns::PatternRole;
use crate::models::Intensity;

const HIGH_KEYWORDS: &[&str] = &["critical", "high", "significant", "major", "serious"];
const MEDIUM_KEYWORDS: &[&str] = &["important", "medium", "moderate"];

static OBLIGATION_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(must|required|critical|essential|urgent)\b")
        .expect("Invalid regex: obligation words")
});

static ADVICE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(should|recommended|important|consider)\b")
        .expect("Invalid regex: advice words")
});

/// Infer the intensity of a free-text fragment.
pub fn infer_intensity(text: &str) -> Intensity {
    let keywords: Vec<String> = PatternRole::IntensityKeyword
        .pattern()
        .capture_all(text)
        .into_iter()
        .map(str::to_lowercase)
        .collect();

    if !keywords.is_empty() {
        let has_any = |tier: &[&str]| keywords.iter().any(|k| tier.contains(&k.as_str()));
        return if has_any(HIGH_KEYWORDS) {
            Intensity::High
        } else if has_any(MEDIUM_KEYWORDS) {
            Intensity::Medium
        } else {
            Intensity::Low
        };
    }

    if OBLIGATION_WORDS.is_match(text) {
        Intensity::High
    } else if ADVICE_WORDS.is_match(text) {
        Intensity::Medium
    } else {
        Intensity::Low
    }
}
