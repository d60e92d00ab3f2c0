//! Workflow Tests
//!
//! Drives `DocumentAnalyzer` with mock language models.

use crate::config::AnalysisConfig;
use crate::error::AppError;
use crate::model::LanguageModel;
use crate::models::ConfidenceLevel;
use crate::workflow::{DocumentAnalyzer, QaAnswer, ANALYSIS_METHOD};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

const DOCUMENT: &str = "This Mutual NDA is entered into by Acme Corp and Globex Ltd. \
                        Each party shall keep the other's information secret for two years.";

const DETECTION_ANSWER: &str =
    "Document Type: Mutual Non-Disclosure Agreement\nCategory: Legal\nConfidence: High";

const RISK_ANSWER: &str = "
- RISK: Unlimited liability for disclosing party
- INTENSITY: High
- RECOMMENDATION: Cap liability at the contract value.

- RISK: No survival clause after termination
- INTENSITY: Medium
- RECOMMENDATION: Add a survival period for confidentiality obligations.
  ";

const COMPLIANCE_ANSWER: &str = "- COMPLIANCE: Missing governing law clause
- INTENSITY: Medium
- RECOMMENDATION: Add a governing law section.";

const SUGGESTION_ANSWER: &str = "SUGGESTION: Define confidential information more precisely
INTENSITY: Low
RECOMMENDATION: Add an explicit definition section.";

const ANALYSIS_ANSWER: &str = "- ANALYSIS: The two-year term is short for trade secrets.
- INTENSITY: Medium
- RECOMMENDATION: Protect trade secrets for as long as they remain secret.";

const QA_ANSWER: &str = "
  Each party must keep the information secret for two years.
";

// ============================================================================
// Mock Models for Testing
// ============================================================================

/// Mock model answering each prompt family with a canned response
pub struct MockModel {
    pub delay_ms: u64,
    pub fail_on: Option<&'static str>,
    pub request_count: Arc<AtomicUsize>,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            delay_ms: 0,
            fail_on: None,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    /// Fail every prompt containing `marker`.
    pub fn failing_on(mut self, marker: &'static str) -> Self {
        self.fail_on = Some(marker);
        self
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn generate(&self, prompt: String) -> Result<String, AppError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if let Some(marker) = self.fail_on {
            if prompt.contains(marker) {
                return Err(AppError::Model("Mock failure".to_string()));
            }
        }

        let answer = if prompt.contains("answer the user's question") {
            QA_ANSWER
        } else if prompt.contains("identify its type") {
            DETECTION_ANSWER
        } else if prompt.contains("RISK POINTS") {
            RISK_ANSWER
        } else if prompt.contains("COMPLIANCE ISSUES") {
            COMPLIANCE_ANSWER
        } else if prompt.contains("IMPROVEMENT SUGGESTIONS") {
            SUGGESTION_ANSWER
        } else {
            ANALYSIS_ANSWER
        };
        Ok(answer.to_string())
    }
}

/// Mock model that always fails
pub struct BrokenModel;

#[async_trait]
impl LanguageModel for BrokenModel {
    async fn generate(&self, _prompt: String) -> Result<String, AppError> {
        Err(AppError::Model("Service unavailable".to_string()))
    }
}

// ============================================================================
// Analysis Tests
// ============================================================================

mod analysis_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_analysis() {
        let model = MockModel::new();
        let requests = model.request_count.clone();
        let analyzer = DocumentAnalyzer::new(model, AnalysisConfig::default());

        let analysis = analyzer.analyze("doc-1", DOCUMENT).await.unwrap();

        assert_eq!(analysis.doc_id, "doc-1");
        assert_eq!(analysis.analysis_method, ANALYSIS_METHOD);
        let summary = &analysis.document_analysis;
        assert_eq!(summary.document_type.document_type, "Mutual Non-Disclosure Agreement");
        assert_eq!(summary.document_type.confidence, ConfidenceLevel::High);
        assert_eq!(summary.generic_insights_count, 4);
        assert_eq!(summary.specific_insights_count, 3);
        assert_eq!(summary.total_insights, 7);
        assert_eq!(analysis.insights.len(), 7);

        // detection + 3 generic + 3 specific
        assert_eq!(requests.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn test_records_keep_prompt_order() {
        let analyzer = DocumentAnalyzer::new(MockModel::new(), AnalysisConfig::default());
        let analysis = analyzer.analyze("doc-2", DOCUMENT).await.unwrap();

        let types: Vec<&str> = analysis
            .insights
            .iter()
            .map(|r| r.type_of_insight.as_str())
            .collect();
        assert_eq!(
            types,
            vec!["risk", "risk", "compliance", "suggestion", "analysis", "analysis", "analysis"]
        );
        assert_eq!(analysis.insights[0].intensity, "high");
        assert_eq!(analysis.insights[0].description, "Unlimited liability for disclosing party");
        assert_eq!(analysis.insights[3].intensity, "low");
    }

    #[tokio::test]
    async fn test_specific_prompt_limit() {
        let model = MockModel::new();
        let requests = model.request_count.clone();
        let config = AnalysisConfig {
            max_specific_prompts: 0,
            ..AnalysisConfig::default()
        };
        let analyzer = DocumentAnalyzer::new(model, config);

        let analysis = analyzer.analyze("doc-3", DOCUMENT).await.unwrap();

        assert_eq!(analysis.document_analysis.specific_insights_count, 0);
        assert_eq!(requests.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_blank_document_is_rejected() {
        let model = MockModel::new();
        let requests = model.request_count.clone();
        let analyzer = DocumentAnalyzer::new(model, AnalysisConfig::default());

        let result = analyzer.analyze("empty", "  \n\t ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_shared_model_through_arc() {
        let model = Arc::new(MockModel::new());
        let first = DocumentAnalyzer::new(model.clone(), AnalysisConfig::default());
        let second = DocumentAnalyzer::new(model.clone(), AnalysisConfig::default());

        first.analyze("a", DOCUMENT).await.unwrap();
        second.analyze("b", DOCUMENT).await.unwrap();

        assert_eq!(model.request_count.load(Ordering::SeqCst), 14);
    }

    #[tokio::test]
    async fn test_analysis_serializes_wire_records() {
        let analyzer = DocumentAnalyzer::new(MockModel::new(), AnalysisConfig::default());
        let analysis = analyzer.analyze("doc-4", DOCUMENT).await.unwrap();

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["analysis_method"], "dynamic_workflow");
        assert_eq!(json["insights"][2]["type_of_insight"], "compliance");
        assert_eq!(json["document_analysis"]["document_type"]["confidence"], "High");
    }
}

// ============================================================================
// Failure Tests
// ============================================================================

mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_prompt_is_skipped() {
        let model = MockModel::new().failing_on("COMPLIANCE ISSUES");
        let analyzer = DocumentAnalyzer::new(model, AnalysisConfig::default());

        let analysis = analyzer.analyze("doc-5", DOCUMENT).await.unwrap();

        assert_eq!(analysis.document_analysis.generic_insights_count, 3);
        assert!(analysis
            .insights
            .iter()
            .all(|r| r.type_of_insight != "compliance"));
    }

    #[tokio::test]
    async fn test_failed_detection_uses_fallback_type() {
        let model = MockModel::new().failing_on("identify its type");
        let analyzer = DocumentAnalyzer::new(model, AnalysisConfig::default());

        let detected = analyzer.detect_document_type(DOCUMENT).await;

        assert_eq!(detected.document_type, "Legal Document");
        assert_eq!(detected.category, "Legal");
        assert_eq!(detected.confidence, ConfidenceLevel::Low);
    }

    #[tokio::test]
    async fn test_all_prompts_failing_yields_completion_record() {
        let analyzer = DocumentAnalyzer::new(BrokenModel, AnalysisConfig::default());

        let analysis = analyzer.analyze("doc-6", DOCUMENT).await.unwrap();

        assert_eq!(analysis.insights.len(), 1);
        assert_eq!(analysis.insights[0].type_of_insight, "suggestion");
        assert_eq!(analysis.insights[0].intensity, "low");
        assert_eq!(analysis.document_analysis.generic_insights_count, 0);
        assert_eq!(analysis.document_analysis.specific_insights_count, 0);
        assert_eq!(analysis.document_analysis.document_type.document_type, "Legal Document");
    }

    #[tokio::test]
    async fn test_slow_model_times_out() {
        let config = AnalysisConfig {
            model_timeout_secs: 1,
            ..AnalysisConfig::default()
        };
        let analyzer = DocumentAnalyzer::new(MockModel::new().with_delay(3_000), config);

        let analysis = analyzer.analyze("doc-7", DOCUMENT).await.unwrap();

        assert_eq!(analysis.document_analysis.document_type.confidence, ConfidenceLevel::Low);
        assert_eq!(analysis.insights.len(), 1);
        assert_eq!(
            analysis.insights[0].description,
            "Document analysis completed successfully using dynamic workflow"
        );
    }
}

// ============================================================================
// Question Answering Tests
// ============================================================================

mod question_tests {
    use super::*;

    #[tokio::test]
    async fn test_answer_is_trimmed() {
        let model = MockModel::new();
        let requests = model.request_count.clone();
        let analyzer = DocumentAnalyzer::new(model, AnalysisConfig::default());

        let answer = analyzer
            .answer_question("doc-8", DOCUMENT, "  How long does confidentiality last? ")
            .await
            .unwrap();

        assert_eq!(
            answer,
            QaAnswer {
                doc_id: "doc-8".to_string(),
                query: "How long does confidentiality last?".to_string(),
                answer: "Each party must keep the information secret for two years.".to_string(),
            }
        );
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected() {
        let model = MockModel::new();
        let requests = model.request_count.clone();
        let analyzer = DocumentAnalyzer::new(model, AnalysisConfig::default());

        let result = analyzer.answer_question("doc-9", DOCUMENT, " \n ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_failure_is_returned() {
        let analyzer = DocumentAnalyzer::new(BrokenModel, AnalysisConfig::default());

        let result = analyzer.answer_question("doc-10", DOCUMENT, "Who are the parties?").await;

        assert!(matches!(result, Err(AppError::Model(_))));
    }

    #[tokio::test]
    async fn test_slow_answer_times_out() {
        let config = AnalysisConfig {
            model_timeout_secs: 1,
            ..AnalysisConfig::default()
        };
        let analyzer = DocumentAnalyzer::new(MockModel::new().with_delay(2_000), config);

        let result = analyzer.answer_question("doc-11", DOCUMENT, "Who are the parties?").await;

        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_answer_serializes_query_field() {
        let analyzer = DocumentAnalyzer::new(MockModel::new(), AnalysisConfig::default());
        let answer = analyzer
            .answer_question("doc-12", DOCUMENT, "Who are the parties?")
            .await
            .unwrap();

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["doc_id"], "doc-12");
        assert_eq!(json["query"], "Who are the parties?");
    }
}
