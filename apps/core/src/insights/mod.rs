//! # Insights Module
//!
//! Turns free-text model answers into typed insight records.
//!
//! ## Components
//! - `patterns`: label, list and emphasis matchers shared by every stage
//! - `document_type`: document type/category/confidence classifier
//! - `segmenter`: splits a response into candidate blocks
//! - `structured`: interprets labeled blocks
//! - `fallback`: keyword heuristics for unlabeled responses
//! - `intensity`: severity inference
//! - `assembler`: guarantees a non-empty result
//! - `parser`: entry point chaining the stages

pub mod assembler;
pub mod document_type;
pub mod fallback;
pub mod intensity;
pub mod parser;
pub mod patterns;
pub mod segmenter;
pub mod structured;

pub use document_type::parse_document_type;
pub use intensity::infer_intensity;
pub use parser::parse_insights_from_text;
pub use patterns::{strip_emphasis, PatternRole};
pub use segmenter::split_into_blocks;
