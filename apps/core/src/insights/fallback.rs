//! Unstructured Fallback Interpreter.
//!
//! Used when a response carries no labeled blocks at all. Fragments come from
//! the first stage that yields anything (bullets, then numbered items, then
//! sentences); type and intensity are inferred from their vocabulary.

use regex::Regex;
use std::sync::LazyLock;

use super::intensity::infer_intensity;
use super::patterns::{strip_emphasis, PatternRole};
use crate::models::{Insight, InsightType};

/// Trust assigned to heuristic extractions
pub const FALLBACK_CONFIDENCE: f32 = 0.7;

const MAX_LIST_ITEMS: usize = 5;
const MAX_SENTENCES: usize = 3;
const MIN_SENTENCE_CHARS: usize = 10;

/// Sentence fragments opening with one of these words are commentary about the response itself.
static BOILERPLATE_PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Based on|This document|Document)\b").expect("Invalid regex: boilerplate preamble")
});

/// Type vocabularies, checked in this order.
static TYPE_VOCABULARIES: LazyLock<Vec<(InsightType, Regex)>> = LazyLock::new(|| {
    vec![
        (
            InsightType::Risk,
            Regex::new(r"(?i)\b(risk|danger|threat|liability|exposure|vulnerability|concern|problem|issue)")
                .expect("Invalid regex: risk vocabulary"),
        ),
        (
            InsightType::Compliance,
            Regex::new(r"(?i)\b(compliance|regulatory|legal|requirement|mandate|obligation|violation|breach)")
                .expect("Invalid regex: compliance vocabulary"),
        ),
        (
            InsightType::Suggestion,
            Regex::new(r"(?i)\b(suggest|recommend|improve|enhance|optimize|consider|should|could|might)")
                .expect("Invalid regex: suggestion vocabulary"),
        ),
    ]
});

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("Invalid regex: sentence terminator"));

type Stage = fn(&str) -> Vec<&str>;

fn bullet_items(text: &str) -> Vec<&str> {
    let mut items = PatternRole::BulletLine.pattern().capture_all(text);
    items.truncate(MAX_LIST_ITEMS);
    items
}

fn numbered_items(text: &str) -> Vec<&str> {
    let mut items = PatternRole::NumberedLine.pattern().capture_all(text);
    items.truncate(MAX_LIST_ITEMS);
    items
}

fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .filter(|s| !BOILERPLATE_PREAMBLE.is_match(s))
        .take(MAX_SENTENCES)
        .collect()
}

const STAGES: [Stage; 3] = [bullet_items, numbered_items, sentences];

/// Infer an insight type from keyword co-occurrence.
pub fn infer_type(text: &str, default_type: InsightType) -> InsightType {
    TYPE_VOCABULARIES
        .iter()
        .find(|(_, vocabulary)| vocabulary.is_match(text))
        .map_or(default_type, |(kind, _)| *kind)
}

/// Canned recommendation for a heuristic insight of the given type.
pub fn recommendation_for(kind: InsightType) -> &'static str {
    match kind {
        InsightType::Risk => {
            "Consider mitigating this risk through contract amendments or additional safeguards."
        }
        InsightType::Compliance => {
            "Ensure compliance by consulting legal counsel and updating relevant clauses."
        }
        InsightType::Suggestion | InsightType::Analysis => {
            "Review this recommendation and consider implementing the suggested improvements."
        }
    }
}

/// Build an insight from one fragment. Fragments that clean down to nothing are dropped.
pub fn insight_from_fragment(fragment: &str, default_type: InsightType) -> Option<Insight> {
    let cleaned = strip_emphasis(fragment.trim());
    let description = cleaned.strip_suffix('.').unwrap_or(&cleaned).trim_end();
    if description.is_empty() {
        return None;
    }

    let kind = infer_type(fragment, default_type);
    Some(Insight::new(
        kind,
        infer_intensity(fragment),
        description.to_string(),
        recommendation_for(kind).to_string(),
        FALLBACK_CONFIDENCE,
    ))
}

/// Interpret an unlabeled response.
pub fn interpret_unstructured(text: &str, default_type: InsightType) -> Vec<Insight> {
    // a stage whose fragments all clean down to nothing hands over to the next one
    STAGES
        .iter()
        .map(|stage| {
            stage(text)
                .into_iter()
                .filter_map(|fragment| insight_from_fragment(fragment, default_type))
                .collect::<Vec<_>>()
        })
        .find(|insights| !insights.is_empty())
        .unwrap_or_default()
}
