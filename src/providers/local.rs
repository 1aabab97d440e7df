//! In-process vector store with brute-force cosine similarity

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::types::Chunk;

use super::vector_store::{VectorSearchResult, VectorStoreProvider};

/// A stored chunk with its embedding, never mutated after insert
struct EmbeddingRecord {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// In-memory vector store
///
/// Brute-force cosine similarity over all stored vectors behind a
/// read-write lock. A batch insert takes the write lock once, so a
/// failed call commits nothing.
pub struct InMemoryVectorStore {
    records: RwLock<Vec<EmbeddingRecord>>,
}

impl InMemoryVectorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    async fn insert(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(Error::storage(format!(
                "chunk/embedding count mismatch: {} chunks, {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let mut records = self.records.write();
        for (chunk, vector) in chunks.iter().zip(embeddings.iter()) {
            records.push(EmbeddingRecord {
                chunk: chunk.clone(),
                vector: vector.clone(),
            });
        }
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<VectorSearchResult>> {
        let records = self.records.read();
        let mut results: Vec<VectorSearchResult> = records
            .iter()
            .map(|record| VectorSearchResult {
                chunk: record.chunk.clone(),
                similarity: cosine_similarity(query_embedding, &record.vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        Ok(results)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn chunk(content: &str) -> Chunk {
        Chunk::new(content, HashMap::new())
    }

    #[tokio::test]
    async fn test_insert_and_len() {
        let store = InMemoryVectorStore::new();
        assert!(store.is_empty().await.unwrap());

        store
            .insert(
                &[chunk("a"), chunk("b")],
                &[vec![1.0, 0.0], vec![0.0, 1.0]],
            )
            .await
            .unwrap();
        assert_eq!(store.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mismatched_batch_is_rejected() {
        let store = InMemoryVectorStore::new();
        let result = store.insert(&[chunk("a")], &[]).await;
        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_search_orders_by_descending_similarity() {
        let store = InMemoryVectorStore::new();
        store
            .insert(
                &[chunk("exact"), chunk("near"), chunk("far")],
                &[
                    vec![1.0, 0.0, 0.0],
                    vec![0.8, 0.6, 0.0],
                    vec![0.0, 0.0, 1.0],
                ],
            )
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 3).await.unwrap();
        assert_eq!(results[0].chunk.content, "exact");
        assert_eq!(results[1].chunk.content, "near");
        assert_eq!(results[2].chunk.content, "far");
        assert!(results[0].similarity > results[1].similarity);
        assert!(results[1].similarity > results[2].similarity);
    }

    #[tokio::test]
    async fn test_search_truncates_to_top_k() {
        let store = InMemoryVectorStore::new();
        store
            .insert(
                &[chunk("a"), chunk("b"), chunk("c")],
                &[vec![1.0, 0.0], vec![0.9, 0.1], vec![0.5, 0.5]],
            )
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_store_returns_no_results() {
        let store = InMemoryVectorStore::new();
        let results = store.search(&[1.0, 0.0], 5).await.unwrap();
        assert!(results.is_empty());
    }
}
