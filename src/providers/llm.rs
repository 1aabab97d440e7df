//! LLM provider trait for text generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generative-model invocation
///
/// Takes a fully rendered prompt and returns the raw text response;
/// prompt construction belongs to the chain layer. Service errors
/// propagate as [`Error::Generation`](crate::error::Error::Generation)
/// with no local retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
