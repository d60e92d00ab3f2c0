// DocuMint Core
// Insight extraction engine for model-generated document analyses

pub mod config;
pub mod error;
pub mod insights;
pub mod model;
pub mod models;
pub mod prompts;
pub mod workflow;

pub use error::AppError;
pub use insights::{parse_document_type, parse_insights_from_text};
pub use models::{ConfidenceLevel, DocumentTypeInfo, Insight, InsightRecord, InsightType, Intensity};

#[cfg(test)]
mod tests;
