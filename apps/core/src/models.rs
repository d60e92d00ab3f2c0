use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// The category of a finding extracted from a model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// A clause or provision that exposes a party to harm.
    Risk,
    /// A regulatory or legal-requirement problem.
    Compliance,
    /// An improvement to clarity, coverage or structure.
    Suggestion,
    /// A free-form analysis finding (document-specific prompts).
    Analysis,
}

impl InsightType {
    /// Every insight type, in the priority order used when matching labels.
    pub const ALL: [InsightType; 4] = [
        InsightType::Risk,
        InsightType::Compliance,
        InsightType::Suggestion,
        InsightType::Analysis,
    ];

    /// Returns the lower-case wire token for the type
    pub fn label(&self) -> &'static str {
        match self {
            InsightType::Risk => "risk",
            InsightType::Compliance => "compliance",
            InsightType::Suggestion => "suggestion",
            InsightType::Analysis => "analysis",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for InsightType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        InsightType::ALL
            .into_iter()
            .find(|kind| kind.label() == token)
            .ok_or_else(|| AppError::Validation(format!("Unknown insight type: {}", s.trim())))
    }
}

/// Severity of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }

    /// Parses `high`/`MEDIUM`/`Low` (any casing). Anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(Intensity::High),
            "medium" => Some(Intensity::Medium),
            "low" => Some(Intensity::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How sure the model was about its document classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "high" => Some(ConfidenceLevel::High),
            "medium" => Some(ConfidenceLevel::Medium),
            "low" => Some(ConfidenceLevel::Low),
            _ => None,
        }
    }
}

/// A normalized finding extracted from one model response.
///
/// Instances are only built by the extraction engine; callers receive them by
/// value and read them through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    kind: InsightType,
    intensity: Intensity,
    description: String,
    recommendation: String,
    confidence: f32,
}

impl Insight {
    pub(crate) fn new(
        kind: InsightType,
        intensity: Intensity,
        description: String,
        recommendation: String,
        confidence: f32,
    ) -> Self {
        Self {
            kind,
            intensity,
            description,
            recommendation,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn kind(&self) -> InsightType {
        self.kind
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Trust in the extraction (0.0 - 1.0): 0.8 labeled, 0.7 heuristic, 0.6 synthesized.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// The document type/category/confidence triple produced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTypeInfo {
    pub document_type: String,
    pub category: String,
    pub confidence: ConfidenceLevel,
}

impl Default for DocumentTypeInfo {
    fn default() -> Self {
        Self {
            document_type: "Unknown Document".to_string(),
            category: "Legal".to_string(),
            confidence: ConfidenceLevel::Medium,
        }
    }
}

/// Serialized form of an insight as consumed by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub type_of_insight: String,
    pub description: String,
    /// Lower-cased intensity (`high`, `medium`, `low`).
    pub intensity: String,
    pub recommendation: String,
}

impl From<&Insight> for InsightRecord {
    fn from(insight: &Insight) -> Self {
        Self {
            type_of_insight: insight.kind().label().to_string(),
            description: insight.description().to_string(),
            intensity: insight.intensity().label().to_lowercase(),
            recommendation: insight.recommendation().to_string(),
        }
    }
}
