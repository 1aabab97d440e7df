//! Provider abstractions for embeddings, generation, and vector storage
//!
//! The embedding service, the generative model, and the vector index are
//! opaque external collaborators behind these traits; the shipped
//! implementations are the Ollama HTTP client and an in-process store.

pub mod embedding;
pub mod llm;
pub mod local;
pub mod ollama;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use local::InMemoryVectorStore;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaLlm};
pub use vector_store::{VectorSearchResult, VectorStoreProvider};

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic fakes for exercising the pipeline without services

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::error::{Error, Result};

    use super::embedding::EmbeddingProvider;
    use super::llm::LlmProvider;

    /// Embeds text as a byte histogram, so identical text maps to an
    /// identical vector and a self-query ranks its own chunk first.
    pub struct FakeEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut vector = vec![0.0f32; 32];
            for (i, byte) in text.bytes().enumerate() {
                vector[(byte as usize) % 32] += 1.0 + (i % 7) as f32 * 0.01;
            }
            Ok(vector)
        }

        fn dimensions(&self) -> usize {
            32
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "fake-embedder"
        }
    }

    /// Returns queued responses and records every prompt it sees
    pub struct FakeLlm {
        responses: Mutex<Vec<String>>,
        pub prompts: Mutex<Vec<String>>,
        /// Fail after this many successful calls, if set
        fail_after: Option<usize>,
        calls: Mutex<usize>,
    }

    impl FakeLlm {
        pub fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().rev().map(|r| r.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
                fail_after: None,
                calls: Mutex::new(0),
            }
        }

        pub fn failing_after(responses: &[&str], successful_calls: usize) -> Self {
            let mut llm = Self::new(responses);
            llm.fail_after = Some(successful_calls);
            llm
        }
    }

    #[async_trait]
    impl LlmProvider for FakeLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            let mut calls = self.calls.lock();
            if let Some(limit) = self.fail_after {
                if *calls >= limit {
                    return Err(Error::generation("model unavailable"));
                }
            }
            *calls += 1;
            self.prompts.lock().push(prompt.to_string());
            Ok(self
                .responses
                .lock()
                .pop()
                .unwrap_or_else(|| "ok".to_string()))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "fake-llm"
        }

        fn model(&self) -> &str {
            "fake"
        }
    }
}
