//! Dynamic document analysis workflow.
//!
//! Detects the document type, runs the generic and document-specific prompts
//! concurrently against a [`LanguageModel`], and feeds every answer through the
//! extraction engine. Individual model failures never abort the analysis.
//! Free-form questions about a document go through [`DocumentAnalyzer::answer_question`].

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::AppError;
use crate::insights::{parse_document_type, parse_insights_from_text};
use crate::model::LanguageModel;
use crate::models::{ConfidenceLevel, DocumentTypeInfo, Insight, InsightRecord};
use crate::prompts::{self, AnalysisPrompt};

pub const ANALYSIS_METHOD: &str = "dynamic_workflow";

/// Summary block of a document analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub document_type: DocumentTypeInfo,
    pub total_insights: usize,
    pub generic_insights_count: usize,
    pub specific_insights_count: usize,
}

/// Complete result of analysing one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub doc_id: String,
    pub insights: Vec<InsightRecord>,
    pub document_analysis: AnalysisSummary,
    pub analysis_method: String,
    pub analyzed_at: DateTime<Utc>,
}

/// Answer to a free-form question about one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub doc_id: String,
    pub query: String,
    pub answer: String,
}

/// Classification used when the detection call itself fails.
fn undetected_document_type() -> DocumentTypeInfo {
    DocumentTypeInfo {
        document_type: "Legal Document".to_string(),
        category: "Legal".to_string(),
        confidence: ConfidenceLevel::Low,
    }
}

/// Record returned when no prompt produced anything.
fn completion_record() -> InsightRecord {
    InsightRecord {
        type_of_insight: "suggestion".to_string(),
        description: "Document analysis completed successfully using dynamic workflow".to_string(),
        intensity: "low".to_string(),
        recommendation: "Review the document for any specific requirements in your use case"
            .to_string(),
    }
}

/// Drives a language model through the analysis prompts
pub struct DocumentAnalyzer<M: LanguageModel> {
    model: M,
    config: AnalysisConfig,
}

impl<M: LanguageModel> DocumentAnalyzer<M> {
    pub fn new(model: M, config: AnalysisConfig) -> Self {
        Self { model, config }
    }

    async fn ask(&self, prompt: String) -> Result<String, AppError> {
        let response = timeout(self.config.model_timeout(), self.model.generate(prompt)).await??;
        Ok(response.trim().to_string())
    }

    /// Detect the document type. Never fails: a failed call yields a low-confidence guess.
    pub async fn detect_document_type(&self, document_text: &str) -> DocumentTypeInfo {
        match self.ask(prompts::document_type_prompt(document_text)).await {
            Ok(response) => parse_document_type(&response),
            Err(e) => {
                warn!("Document type detection failed: {}", e);
                undetected_document_type()
            }
        }
    }

    /// Ask every prompt concurrently and parse each answer with the prompt's default type.
    pub async fn run_prompts(&self, prompts: Vec<AnalysisPrompt>) -> Vec<Insight> {
        let answers = join_all(prompts.iter().map(|prompt| self.ask(prompt.text.clone()))).await;

        let mut insights = Vec::new();
        for (index, (prompt, answer)) in prompts.iter().zip(answers).enumerate() {
            match answer {
                Ok(response) => {
                    let parsed = parse_insights_from_text(&response, prompt.default_type);
                    info!(
                        "Prompt {} ({:?}, {}) yielded {} insights",
                        index,
                        prompt.scope,
                        prompt.default_type,
                        parsed.len()
                    );
                    insights.extend(parsed);
                }
                Err(e) => warn!("Prompt {} ({:?}) failed: {}", index, prompt.scope, e),
            }
        }
        insights
    }

    /// Answer a question about the document. Model failures and timeouts are returned.
    pub async fn answer_question(
        &self,
        doc_id: &str,
        document_text: &str,
        question: &str,
    ) -> Result<QaAnswer, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Validation(format!(
                "Question about document {} is empty",
                doc_id
            )));
        }

        info!("Answering question for document {}", doc_id);
        let answer = self.ask(prompts::qa_prompt(document_text, question)).await?;

        Ok(QaAnswer {
            doc_id: doc_id.to_string(),
            query: question.to_string(),
            answer,
        })
    }

    /// Run the full workflow for one document.
    pub async fn analyze(
        &self,
        doc_id: &str,
        document_text: &str,
    ) -> Result<DocumentAnalysis, AppError> {
        if document_text.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Document {} has no text to analyze",
                doc_id
            )));
        }

        info!("Starting dynamic analysis for document {}", doc_id);
        let document_type = self.detect_document_type(document_text).await;
        info!("Detected document type: {:?}", document_type);

        let generic = self.run_prompts(prompts::generic_prompts(document_text)).await;

        let mut specific_prompts =
            prompts::specific_prompts(&document_type.document_type, document_text);
        specific_prompts.truncate(self.config.max_specific_prompts);
        let specific = self.run_prompts(specific_prompts).await;

        let mut records: Vec<InsightRecord> = generic
            .iter()
            .chain(specific.iter())
            .map(InsightRecord::from)
            .collect();
        if records.is_empty() {
            warn!("No prompt produced insights for document {}", doc_id);
            records.push(completion_record());
        }

        info!(
            "Analysis of {} produced {} insights ({} generic, {} specific)",
            doc_id,
            records.len(),
            generic.len(),
            specific.len()
        );

        Ok(DocumentAnalysis {
            doc_id: doc_id.to_string(),
            document_analysis: AnalysisSummary {
                document_type,
                total_insights: records.len(),
                generic_insights_count: generic.len(),
                specific_insights_count: specific.len(),
            },
            insights: records,
            analysis_method: ANALYSIS_METHOD.to_string(),
            analyzed_at: Utc::now(),
        })
    }
}
