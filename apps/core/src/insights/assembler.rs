//! Insight Assembler.
//!
//! Last stage of the cascade: a response always yields at least one insight.

use regex::Regex;
use std::sync::LazyLock;

use super::patterns::strip_emphasis;
use crate::models::{Insight, InsightType, Intensity};

/// Trust assigned to the synthesized insight
pub const SYNTHESIZED_CONFIDENCE: f32 = 0.6;

pub const SYNTHESIZED_RECOMMENDATION: &str =
    "Review this analysis and consider the implications for your document.";

const EMPTY_RESPONSE_DESCRIPTION: &str = "No analysis content was returned.";
const DESCRIPTION_CHARS: usize = 200;

static LINE_PREAMBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Based on|Document)\b").expect("Invalid regex: line preamble"));

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// The leading substantive content of a response, for use as a description.
fn main_content(text: &str) -> String {
    let content = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !LINE_PREAMBLE.is_match(line))
        .collect::<Vec<_>>()
        .join(" ");

    [strip_emphasis(&content), strip_emphasis(text.trim())]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .map_or_else(
            || EMPTY_RESPONSE_DESCRIPTION.to_string(),
            |candidate| truncate_chars(&candidate, DESCRIPTION_CHARS),
        )
}

/// Fabricate the single insight returned when nothing could be extracted.
pub fn synthesize(text: &str, default_type: InsightType) -> Insight {
    Insight::new(
        default_type,
        Intensity::Medium,
        main_content(text),
        SYNTHESIZED_RECOMMENDATION.to_string(),
        SYNTHESIZED_CONFIDENCE,
    )
}

/// Pass extracted insights through, or synthesize one if there are none.
pub fn ensure_non_empty(
    insights: Vec<Insight>,
    text: &str,
    default_type: InsightType,
) -> Vec<Insight> {
    if insights.is_empty() {
        vec![synthesize(text, default_type)]
    } else {
        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boilerplate_lines_are_dropped() {
        let insight = synthesize(
            "Based on my review:\nThe agreement is **balanced** overall\nDocument ends here",
            InsightType::Risk,
        );
        assert_eq!(insight.description(), "The agreement is balanced overall");
        assert_eq!(insight.kind(), InsightType::Risk);
        assert_eq!(insight.intensity(), Intensity::Medium);
        assert_eq!(insight.confidence(), SYNTHESIZED_CONFIDENCE);
    }

    #[test]
    fn test_document_plural_line_is_content() {
        let insight = synthesize("Document follows\nDocuments are attached", InsightType::Risk);
        assert_eq!(insight.description(), "Documents are attached");
    }

    #[test]
    fn test_long_content_is_truncated_on_char_boundary() {
        let text = "é".repeat(250);
        let insight = synthesize(&text, InsightType::Suggestion);
        assert_eq!(insight.description().chars().count(), 203);
        assert!(insight.description().ends_with("..."));
    }

    #[test]
    fn test_exactly_limit_is_not_truncated() {
        let text = "a".repeat(200);
        assert_eq!(synthesize(&text, InsightType::Risk).description(), text);
    }

    #[test]
    fn test_pure_boilerplate_echoes_raw_text() {
        let insight = synthesize("Based on the document provided.", InsightType::Compliance);
        assert_eq!(insight.description(), "Based on the document provided.");
    }

    #[test]
    fn test_empty_text_has_description() {
        let insight = synthesize("   ", InsightType::Compliance);
        assert_eq!(insight.description(), EMPTY_RESPONSE_DESCRIPTION);
        assert_eq!(insight.recommendation(), SYNTHESIZED_RECOMMENDATION);
    }

    #[test]
    fn test_existing_insights_pass_through() {
        let existing = vec![synthesize("x", InsightType::Risk), synthesize("y", InsightType::Risk)];
        assert_eq!(ensure_non_empty(existing.clone(), "z", InsightType::Risk), existing);
    }
}
