//! Insight Parser - entry points of the extraction engine.
//!
//! Cascade per response:
//! 1. Labeled blocks (confidence 0.8)
//! 2. Bullets, numbered items, then sentences (confidence 0.7)
//! 3. One synthesized insight (confidence 0.6)
//!
//! Pure and synchronous; safe to call from any number of tasks at once.

use tracing::debug;

use super::assembler::ensure_non_empty;
use super::fallback::interpret_unstructured;
use super::structured::interpret_blocks;
use crate::models::{Insight, InsightType};

/// Parse the free-text answer to an analysis prompt into insights.
///
/// `default_type` is the category implied by the prompt that produced `text`.
/// The result is never empty.
pub fn parse_insights_from_text(text: &str, default_type: InsightType) -> Vec<Insight> {
    let structured = interpret_blocks(text, default_type);
    if !structured.is_empty() {
        debug!("Extracted {} labeled insights", structured.len());
        return structured;
    }

    let heuristic = interpret_unstructured(text, default_type);
    if heuristic.is_empty() {
        debug!("No insight found, synthesizing one ({} chars of input)", text.len());
    } else {
        debug!("Extracted {} unlabeled insights", heuristic.len());
    }
    ensure_non_empty(heuristic, text, default_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::assembler::SYNTHESIZED_CONFIDENCE;
    use crate::insights::fallback::FALLBACK_CONFIDENCE;
    use crate::insights::structured::STRUCTURED_CONFIDENCE;

    #[test]
    fn test_structured_stage_wins() {
        let insights = parse_insights_from_text(
            "RISK: Unlimited indemnity\nINTENSITY: High\n\n- a stray bullet",
            InsightType::Suggestion,
        );
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].confidence(), STRUCTURED_CONFIDENCE);
    }

    #[test]
    fn test_fallback_stage() {
        let insights = parse_insights_from_text("- Fees are unclear", InsightType::Risk);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].confidence(), FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_synthesized_stage() {
        let insights = parse_insights_from_text("", InsightType::Risk);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].confidence(), SYNTHESIZED_CONFIDENCE);
    }
}
