//! Prompt catalog for the dynamic analysis workflow.
//!
//! One detection prompt, three generic prompts (risk, compliance, suggestion)
//! and a document-specific question set chosen from the detected type.

use serde::{Deserialize, Serialize};

use crate::models::InsightType;

/// Whether a prompt is asked of every document or chosen by document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptScope {
    Generic,
    Specific,
}

/// A prompt together with the insight type its answer defaults to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPrompt {
    pub text: String,
    pub default_type: InsightType,
    pub scope: PromptScope,
}

/// Question sets for the document families the workflow knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSet {
    Nda,
    Employment,
    Lease,
    Purchase,
    Service,
    Terms,
    Privacy,
}

/// Key phrases for each question set, checked in order against the lower-cased type.
const QUESTION_SET_KEYS: &[(&str, QuestionSet)] = &[
    ("non-disclosure", QuestionSet::Nda),
    ("nda", QuestionSet::Nda),
    ("confidentiality", QuestionSet::Nda),
    ("employment", QuestionSet::Employment),
    ("job", QuestionSet::Employment),
    ("work", QuestionSet::Employment),
    ("lease", QuestionSet::Lease),
    ("rental", QuestionSet::Lease),
    ("rent", QuestionSet::Lease),
    ("purchase", QuestionSet::Purchase),
    ("buy", QuestionSet::Purchase),
    ("sale", QuestionSet::Purchase),
    ("service", QuestionSet::Service),
    ("consulting", QuestionSet::Service),
    ("professional", QuestionSet::Service),
    ("terms", QuestionSet::Terms),
    ("tos", QuestionSet::Terms),
    ("conditions", QuestionSet::Terms),
    ("privacy", QuestionSet::Privacy),
    ("data", QuestionSet::Privacy),
];

impl QuestionSet {
    pub fn questions(&self) -> &'static [&'static str] {
        match self {
            QuestionSet::Nda => &[
                "Analyze the confidentiality scope and duration in this NDA. Are the terms reasonable and enforceable?",
                "Review the exceptions and carve-outs in this NDA. Do they protect legitimate business needs?",
                "Examine the return and destruction obligations. Are they practical and clearly defined?",
                "Assess the remedies for confidentiality breaches. Are they appropriate?",
            ],
            QuestionSet::Employment => &[
                "Review the compensation and benefits structure. Is it clearly defined and fair?",
                "Analyze any non-compete or non-solicitation clauses. Are they reasonable in scope and duration?",
                "Examine the termination provisions. Are they balanced and legally compliant?",
                "Check the intellectual property assignment clauses. Are they overreaching?",
            ],
            QuestionSet::Lease => &[
                "Review the rent escalation and payment terms. Are they clear and reasonable?",
                "Analyze the maintenance and repair responsibilities. Are they fairly allocated?",
                "Examine the default and termination provisions. Are they balanced for both parties?",
                "Check the insurance and liability requirements. Are they excessive?",
            ],
            QuestionSet::Purchase => &[
                "Review the payment terms and conditions. Do they protect both parties?",
                "Analyze the delivery and acceptance criteria. Are they specific and measurable?",
                "Examine the warranty and liability provisions. Are they appropriate for the goods or services?",
                "Check the dispute resolution mechanisms. Are they efficient and fair?",
            ],
            QuestionSet::Service => &[
                "Review the scope of work and deliverables. Are they clearly defined and measurable?",
                "Analyze the performance standards and SLAs. Are they realistic and enforceable?",
                "Examine the payment terms and milestones. Are they fair and practical?",
                "Check the intellectual property and confidentiality provisions. Are they appropriate?",
            ],
            QuestionSet::Terms => &[
                "Review the user rights and restrictions. Are they clearly communicated and reasonable?",
                "Analyze the liability limitations and disclaimers. Are they legally compliant?",
                "Examine the privacy and data collection practices. Are they transparent?",
                "Check the modification and termination procedures. Are they fair to users?",
            ],
            QuestionSet::Privacy => &[
                "Review how data collection and usage are described. Is it comprehensive and clear?",
                "Analyze the user consent mechanisms. Do they meet privacy regulations?",
                "Examine the data sharing and third-party provisions. Are they transparent and limited?",
                "Check the user rights and control mechanisms. Are they adequate and accessible?",
            ],
        }
    }
}

/// Pick the question set for a detected document type (`Service` when nothing matches).
pub fn question_set_for(document_type: &str) -> QuestionSet {
    let lowered = document_type.to_lowercase();
    QUESTION_SET_KEYS
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map_or(QuestionSet::Service, |(_, set)| *set)
}

pub fn document_type_prompt(document_text: &str) -> String {
    format!(
        "Analyze the following document and identify its type.\n\n\
         Document content:\n{document_text}\n\n\
         Identify the document type (e.g. \"Non-Disclosure Agreement\", \"Employment Contract\", \
         \"Terms of Service\", \"Privacy Policy\", \"Lease Agreement\").\n\n\
         Respond in this format:\n\
         Document Type: [TYPE]\n\
         Category: [Legal/Business/Technical/etc.]\n\
         Confidence: [High/Medium/Low]\n"
    )
}

/// Answer returned when the document does not contain what was asked.
pub const QA_NOT_FOUND_ANSWER: &str =
    "The information to answer this question is not available in the provided document.";

/// A question-answering prompt grounded on the document text only.
pub fn qa_prompt(document_text: &str, question: &str) -> String {
    format!(
        "You are an AI assistant that answers questions about documents accurately and concisely.\n\n\
         Based on the provided document, answer the user's question. If the information is not \
         available in the document, clearly state that.\n\n\
         Document content:\n{document_text}\n\n\
         Question: {question}\n\n\
         Provide a clear, accurate answer based only on the information in the document. If the \
         answer cannot be found in the document, say \"{QA_NOT_FOUND_ANSWER}\"\n"
    )
}

fn labeled_prompt(task: &str, label: &str, item: &str, document_text: &str) -> String {
    format!(
        "{task}\n\n\
         Document:\n{document_text}\n\n\
         For each {item} you identify, specify:\n\
         - {label}: [Description]\n\
         - INTENSITY: [High/Medium/Low]\n\
         - RECOMMENDATION: [What should be done about it]\n"
    )
}

/// The prompts asked of every document, in risk / compliance / suggestion order.
pub fn generic_prompts(document_text: &str) -> Vec<AnalysisPrompt> {
    let tasks = [
        (
            InsightType::Risk,
            "Analyze this document for potential RISK POINTS: clauses, terms or provisions that could pose risks to either party.",
            "RISK",
            "risk point",
        ),
        (
            InsightType::Compliance,
            "Review this document for COMPLIANCE ISSUES: provisions that may not meet legal requirements, missing mandatory clauses, or regulatory concerns.",
            "COMPLIANCE",
            "compliance issue",
        ),
        (
            InsightType::Suggestion,
            "Provide IMPROVEMENT SUGGESTIONS for this document: areas that could be clearer, more comprehensive, or better structured.",
            "SUGGESTION",
            "suggestion",
        ),
    ];

    tasks
        .into_iter()
        .map(|(default_type, task, label, item)| AnalysisPrompt {
            text: labeled_prompt(task, label, item, document_text),
            default_type,
            scope: PromptScope::Generic,
        })
        .collect()
}

/// The question set for `document_type`, each answered as `ANALYSIS:` blocks.
pub fn specific_prompts(document_type: &str, document_text: &str) -> Vec<AnalysisPrompt> {
    question_set_for(document_type)
        .questions()
        .iter()
        .map(|question| AnalysisPrompt {
            text: format!(
                "{question}\n\n\
                 Document:\n{document_text}\n\n\
                 Refer to specific clauses of the document. Format your response as:\n\
                 - ANALYSIS: [Your detailed analysis]\n\
                 - INTENSITY: [High/Medium/Low]\n\
                 - RECOMMENDATION: [Specific actionable recommendation]\n"
            ),
            default_type: InsightType::Analysis,
            scope: PromptScope::Specific,
        })
        .collect()
}
