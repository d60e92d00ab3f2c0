//! Test Module
//!
//! Crate-level test suites for the DocuMint engine.
//!
//! ## Test Categories
//! - `parser_tests`: end-to-end extraction properties of `parse_insights_from_text`
//! - `document_type_tests`: classifier behaviour on realistic model answers
//! - `workflow_tests`: analysis workflow driven by mock language models
//! - `config_tests`: environment-driven configuration

pub mod workflow_tests;
