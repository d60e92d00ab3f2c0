//! Block Segmenter.
//!
//! Cuts a raw response into candidate insight-sized blocks: paragraphs first,
//! then zero-width boundaries before each canonical label (`RISK:` ...) and
//! before every bullet or numbered line. List lines that carry an attribute
//! (`- INTENSITY: High`) stay attached to the insight above them.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n\s*").expect("Invalid regex: blank line separator"));

static LABEL_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:RISK|COMPLIANCE|SUGGESTION|ANALYSIS)[*_]*:").expect("Invalid regex: label marker")
});

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(?:[-•*]|\d+\.)[ \t]").expect("Invalid regex: list marker"));

static ATTRIBUTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]*(?:[-•*]|\d+\.)[ \t*_]*(?:intensity|recommendation)\b")
        .expect("Invalid regex: attribute line")
});

/// Characters that may precede a label on its line without being content.
fn is_decoration(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_digit() || matches!(c, '-' | '•' | '*' | '_' | '#' | '>' | '.')
}

/// Byte offsets at which every line of `text` starts.
fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1))
}

fn boundaries(paragraph: &str) -> Vec<usize> {
    let mut cuts: Vec<usize> = line_starts(paragraph)
        .filter(|&start| {
            let line = &paragraph[start..];
            LIST_MARKER.is_match(line) && !ATTRIBUTE_LINE.is_match(line)
        })
        .collect();

    for marker in LABEL_MARKER.find_iter(paragraph) {
        let line_start = paragraph[..marker.start()].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &paragraph[line_start..marker.start()];
        cuts.push(if prefix.chars().all(is_decoration) {
            line_start
        } else {
            marker.start()
        });
    }

    cuts.sort_unstable();
    cuts.dedup();
    cuts
}

/// Split a response into trimmed, non-empty blocks in their original order.
pub fn split_into_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    for paragraph in BLANK_LINE.split(text) {
        let mut start = 0;
        for cut in boundaries(paragraph) {
            blocks.push(&paragraph[start..cut]);
            start = cut;
        }
        blocks.push(&paragraph[start..]);
    }

    blocks
        .into_iter()
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}
