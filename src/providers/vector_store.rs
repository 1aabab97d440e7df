//! Vector store provider trait for storing and searching embeddings

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Chunk;

/// Search result from the vector store
#[derive(Debug, Clone)]
pub struct VectorSearchResult {
    /// The matched chunk
    pub chunk: Chunk,
    /// Similarity score (higher is more similar)
    pub similarity: f32,
}

/// Trait for vector storage and similarity search
///
/// The store owns its embedding records: created at insert time, never
/// mutated, reachable through similarity queries only. No automatic
/// deduplication happens on insert.
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert chunks with their embeddings; `chunks` and `embeddings`
    /// are parallel slices
    async fn insert(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()>;

    /// Search for the `top_k` chunks most similar to a query embedding,
    /// ordered by descending similarity
    async fn search(&self, query_embedding: &[f32], top_k: usize)
        -> Result<Vec<VectorSearchResult>>;

    /// Get total number of records stored
    async fn len(&self) -> Result<usize>;

    /// Check if the store is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Check if the provider is healthy
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
