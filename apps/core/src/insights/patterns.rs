//! Pattern Library.
//!
//! Central registry of the matchers used by every extraction stage, keyed by
//! semantic role. Matching never mutates its input and reports "no match" as
//! `None` or an empty vector.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::InsightType;

/// Semantic role of a matcher in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternRole {
    /// `RISK: ...`
    Risk,
    /// `COMPLIANCE: ...`
    Compliance,
    /// `SUGGESTION: ...`
    Suggestion,
    /// `ANALYSIS: ...`
    Analysis,
    /// `INTENSITY: High|Medium|Low`
    Intensity,
    /// `RECOMMENDATION: ...` up to the next content label
    Recommendation,
    /// `- item`, `• item`, `* item`
    BulletLine,
    /// `1. item`
    NumberedLine,
    /// Bare severity words (critical, minor, ...)
    IntensityKeyword,
}

impl PatternRole {
    /// Content labels in the order they are tried against a block.
    pub const CONTENT: [PatternRole; 4] = [
        PatternRole::Risk,
        PatternRole::Compliance,
        PatternRole::Suggestion,
        PatternRole::Analysis,
    ];

    /// The insight type a content label announces.
    pub fn insight_type(self) -> Option<InsightType> {
        match self {
            PatternRole::Risk => Some(InsightType::Risk),
            PatternRole::Compliance => Some(InsightType::Compliance),
            PatternRole::Suggestion => Some(InsightType::Suggestion),
            PatternRole::Analysis => Some(InsightType::Analysis),
            _ => None,
        }
    }

    pub fn pattern(self) -> &'static Pattern {
        let library = &*LIBRARY;
        match self {
            PatternRole::Risk => &library.risk,
            PatternRole::Compliance => &library.compliance,
            PatternRole::Suggestion => &library.suggestion,
            PatternRole::Analysis => &library.analysis,
            PatternRole::Intensity => &library.intensity,
            PatternRole::Recommendation => &library.recommendation,
            PatternRole::BulletLine => &library.bullet_line,
            PatternRole::NumberedLine => &library.numbered_line,
            PatternRole::IntensityKeyword => &library.intensity_keyword,
        }
    }
}

/// A compiled matcher.
///
/// Labeled patterns carry a terminator: the captured text runs from the end of
/// the label to the first terminator hit (at least one character in) or the end
/// of the input. Other patterns report their first capture group.
pub struct Pattern {
    matcher: Regex,
    terminator: Option<Regex>,
}

impl Pattern {
    /// Returns the trimmed text captured by the first match, if any.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.matcher.captures(text)?;
        let captured = match &self.terminator {
            Some(terminator) => {
                let start = caps.get(0)?.end();
                let first = text[start..].chars().next()?;
                let end = terminator
                    .find_at(text, start + first.len_utf8())
                    .map_or(text.len(), |m| m.start());
                &text[start..end]
            }
            None => caps.get(1).or_else(|| caps.get(0))?.as_str(),
        };
        let captured = captured.trim();
        (!captured.is_empty()).then_some(captured)
    }

    /// Returns every non-empty capture, in input order.
    pub fn capture_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.matcher
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

struct PatternLibrary {
    risk: Pattern,
    compliance: Pattern,
    suggestion: Pattern,
    analysis: Pattern,
    intensity: Pattern,
    recommendation: Pattern,
    bullet_line: Pattern,
    numbered_line: Pattern,
    intensity_keyword: Pattern,
}

/// Label prefix tolerant of emphasis: `RISK:`, `**Risk:**`, `__RISK__:`.
fn label(word: &str) -> String {
    format!(r"(?i)\b{word}[ \t]*[*_]*[ \t]*:[*_]*\s*")
}

fn compile(pattern: &str, terminator: Option<&str>) -> Pattern {
    // NOTE: every pattern here is a literal, expect() only fires on a typo caught by the tests
    Pattern {
        matcher: Regex::new(pattern).expect("Invalid regex: pattern library matcher"),
        terminator: terminator
            .map(|t| Regex::new(t).expect("Invalid regex: pattern library terminator")),
    }
}

const CONTENT_TERMINATOR: &str = r"(?i)\n|intensity|recommendation";
const RECOMMENDATION_TERMINATOR: &str =
    r"(?i)\n[\s\-•*#>_\d.]*\b(?:risk|compliance|suggestion|analysis)[ \t]*[*_]*[ \t]*:";

static LIBRARY: LazyLock<PatternLibrary> = LazyLock::new(|| PatternLibrary {
    risk: compile(&label("risk"), Some(CONTENT_TERMINATOR)),
    compliance: compile(&label("compliance"), Some(CONTENT_TERMINATOR)),
    suggestion: compile(&label("suggestion"), Some(CONTENT_TERMINATOR)),
    analysis: compile(&label("analysis"), Some(CONTENT_TERMINATOR)),
    intensity: compile(&format!(r"{}(high|medium|low)\b", label("intensity")), None),
    recommendation: compile(&label("recommendation"), Some(RECOMMENDATION_TERMINATOR)),
    bullet_line: compile(r"(?m)^[ \t]*[-•*][ \t]+(.+)$", None),
    numbered_line: compile(r"(?m)^[ \t]*\d+\.[ \t]+(.+)$", None),
    intensity_keyword: compile(
        r"(?i)\b(critical|high|significant|major|serious|important|medium|moderate|low|minor|minimal)\b",
        None,
    ),
});

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid regex: bold stars"));
static ITALIC_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("Invalid regex: italic stars"));
// Underscore emphasis only counts when it is not glued to a word (snake_case stays intact).
static BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\W)__([^_]+)__(\W|$)").expect("Invalid regex: bold underscores")
});
static ITALIC_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\W)_([^_]+)_(\W|$)").expect("Invalid regex: italic underscores")
});

/// Replaces emphasised spans with their inner text until nothing changes, then
/// drops stray markers left dangling at either end.
pub fn strip_emphasis(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = BOLD_STARS.replace_all(&current, "$1");
        let next = ITALIC_STARS.replace_all(&next, "$1");
        let next = BOLD_UNDERSCORES.replace_all(&next, "${1}${2}${3}");
        let next = ITALIC_UNDERSCORES.replace_all(&next, "${1}${2}${3}").into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current
        .trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace())
        .to_string()
}
