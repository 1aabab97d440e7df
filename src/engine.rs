//! Query pipeline: retrieval, chain stages, and aggregation

use std::sync::Arc;
use std::time::Instant;

use crate::analysis::{ConversationMemory, DocumentAnalyzer};
use crate::error::{Error, Result};
use crate::retrieval::VectorIndex;
use crate::types::{QueryResponse, TokenUsageReport};

/// Drives one query end to end
///
/// Retrieves context, runs the summary and recommendation stages, and
/// merges their token accounting. A failure in either stage fails the
/// whole query; no partial result is synthesized.
pub struct QueryEngine {
    index: Arc<VectorIndex>,
    analyzer: Arc<DocumentAnalyzer>,
}

impl QueryEngine {
    /// Create an engine over a vector index and an analyzer
    pub fn new(index: Arc<VectorIndex>, analyzer: Arc<DocumentAnalyzer>) -> Self {
        Self { index, analyzer }
    }

    /// Answer a query with top-`k` retrieved context
    ///
    /// An empty retrieval short-circuits to the no-context response
    /// without invoking any chain.
    pub async fn query(
        &self,
        text: &str,
        k: usize,
        memory: &ConversationMemory,
    ) -> Result<QueryResponse> {
        if text.trim().is_empty() {
            return Err(Error::InvalidRequest("query text must not be empty".to_string()));
        }
        if k == 0 {
            return Err(Error::InvalidRequest("k must be positive".to_string()));
        }

        let start = Instant::now();
        tracing::info!("Query: \"{}\" (k={})", text, k);

        let chunks = self.index.similarity_search(text, k).await?;
        if chunks.is_empty() {
            tracing::info!("No chunks retrieved, returning no-context response");
            return Ok(QueryResponse::no_context(start.elapsed().as_millis() as u64));
        }

        let (summary, summary_usage) = self.analyzer.summarize(&chunks).await?;
        let (recommendation, recommendation_usage) =
            self.analyzer.recommend(&chunks, text, memory).await?;

        let sources = DocumentAnalyzer::sources(&chunks);
        let token_usage = TokenUsageReport::new(summary_usage, recommendation_usage);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Query completed in {}ms ({} chunks, {} tokens)",
            processing_time_ms,
            chunks.len(),
            token_usage.total.total_tokens
        );

        Ok(QueryResponse {
            summary,
            recommendations: vec![recommendation],
            sources,
            token_usage,
            chunks_retrieved: chunks.len(),
            processing_time_ms,
        })
    }
}
