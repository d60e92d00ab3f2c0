//! Document-Type Classifier.
//!
//! Reads the answer to a "what type of document is this" prompt. Labeled lines
//! win; otherwise the first substantive line is accepted when it names a
//! known kind of document. Never fails: missing signal keeps the defaults.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::patterns::strip_emphasis;
use crate::models::{ConfidenceLevel, DocumentTypeInfo};

static DOCUMENT_TYPE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdocument[ \t]+type[ \t]*[*_]*[ \t]*:[*_]*[ \t]*(.+)")
        .expect("Invalid regex: document type label")
});

static CATEGORY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcategory[ \t]*[*_]*[ \t]*:[*_]*[ \t]*(.+)").expect("Invalid regex: category label")
});

static CONFIDENCE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bconfidence[ \t]*[*_]*[ \t]*:[*_]*[ \t]*(high|medium|low)\b")
        .expect("Invalid regex: confidence label")
});

static DOCUMENT_NOUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(agreement|contract|policy|terms|conditions|lease|nda|employment)")
        .expect("Invalid regex: document nouns")
});

/// Lines opening with these are commentary, not a type name.
const PREAMBLES: &[&str] = &["Based on", "This document"];

/// Number of non-empty lines inspected by the first-line fallback.
const FALLBACK_LINES: usize = 3;

fn labeled_value(pattern: &Regex, text: &str) -> Option<String> {
    let raw = pattern.captures(text)?.get(1)?.as_str();
    let value = strip_emphasis(raw.trim());
    (!value.is_empty()).then_some(value)
}

fn first_line_document_type(text: &str) -> Option<String> {
    let line = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(FALLBACK_LINES)
        .find(|line| !PREAMBLES.iter().any(|p| line.starts_with(p)))?;

    DOCUMENT_NOUNS.is_match(line).then(|| line.to_string())
}

/// Classify a model response into a document type, category and confidence.
pub fn parse_document_type(text: &str) -> DocumentTypeInfo {
    let mut info = DocumentTypeInfo::default();

    if let Some(document_type) = labeled_value(&DOCUMENT_TYPE_LABEL, text) {
        info.document_type = document_type;
    }
    if let Some(category) = labeled_value(&CATEGORY_LABEL, text) {
        info.category = category;
    }
    if let Some(level) = CONFIDENCE_LABEL
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| ConfidenceLevel::from_label(m.as_str()))
    {
        info.confidence = level;
    }

    if info.document_type == DocumentTypeInfo::default().document_type {
        if let Some(line) = first_line_document_type(text) {
            debug!("Document type taken from leading line: {}", line);
            info.document_type = line;
        }
    }

    info
}
