//! Embedding/retrieval adapter over the opaque providers

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::Chunk;

/// Adapter pairing the embedding service with the vector store
///
/// Computes embeddings on the write and query paths and delegates
/// storage and ranking to the store provider. Service failures surface
/// unchanged as `Storage`/`Timeout`; there are no internal retries and
/// no deduplication of re-added chunks.
pub struct VectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
}

impl VectorIndex {
    /// Create an index over an embedder and a store
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStoreProvider>) -> Self {
        Self { embedder, store }
    }

    /// Embed and store a batch of chunks
    ///
    /// All embeddings are computed before anything is inserted, so a
    /// failed call commits nothing to the store.
    pub async fn add(&self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        self.store.insert(chunks, &embeddings).await
    }

    /// Retrieve the `k` chunks most similar to the query text,
    /// ordered by descending similarity
    pub async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Chunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&query_embedding, k).await?;
        Ok(results.into_iter().map(|r| r.chunk).collect())
    }

    /// Number of records in the underlying store
    pub async fn len(&self) -> Result<usize> {
        self.store.len().await
    }

    /// Whether the underlying store holds no records
    pub async fn is_empty(&self) -> Result<bool> {
        self.store.is_empty().await
    }
}
