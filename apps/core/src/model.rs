use async_trait::async_trait;
use std::sync::Arc;

use crate::error::AppError;

/// Defines the public interface for the model-invocation collaborator.
///
/// This trait abstracts the concrete backend (hosted API, local server, canned
/// responses in tests) so the analysis workflow can be driven by any of them.
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Generates a complete text response for a prompt.
    async fn generate(&self, prompt: String) -> Result<String, AppError>;
}

#[async_trait]
impl<M: LanguageModel + ?Sized> LanguageModel for Arc<M> {
    async fn generate(&self, prompt: String) -> Result<String, AppError> {
        (**self).generate(prompt).await
    }
}
