//! Structured-Block Interpreter.
//!
//! Reads explicitly labeled blocks (`RISK:` / `INTENSITY:` / `RECOMMENDATION:`).

use super::intensity::infer_intensity;
use super::patterns::{strip_emphasis, PatternRole};
use super::segmenter::split_into_blocks;
use crate::models::{Insight, InsightType, Intensity};

/// Trust assigned to explicitly labeled extractions
pub const STRUCTURED_CONFIDENCE: f32 = 0.8;

pub const DEFAULT_RECOMMENDATION: &str = "Consider reviewing this item carefully.";

/// Interpret one block. Returns `None` when the block has no content label.
pub fn interpret_block(block: &str, default_type: InsightType) -> Option<Insight> {
    let (role, raw_description) = PatternRole::CONTENT
        .into_iter()
        .find_map(|role| role.pattern().capture(block).map(|text| (role, text)))?;

    let description = strip_emphasis(raw_description);
    if description.is_empty() {
        return None;
    }

    // "analysis" carries no category of its own: the prompt's type applies
    let kind = match role.insight_type() {
        Some(InsightType::Analysis) | None => default_type,
        Some(kind) => kind,
    };

    let intensity = PatternRole::Intensity
        .pattern()
        .capture(block)
        .and_then(Intensity::from_label)
        .unwrap_or_else(|| infer_intensity(&description));

    let recommendation = PatternRole::Recommendation
        .pattern()
        .capture(block)
        .map(strip_emphasis)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DEFAULT_RECOMMENDATION.to_string());

    Some(Insight::new(
        kind,
        intensity,
        description,
        recommendation,
        STRUCTURED_CONFIDENCE,
    ))
}

/// Segment a response and interpret every block, keeping block order.
pub fn interpret_blocks(text: &str, default_type: InsightType) -> Vec<Insight> {
    split_into_blocks(text)
        .into_iter()
        .filter_map(|block| interpret_block(block, default_type))
        .collect()
}
