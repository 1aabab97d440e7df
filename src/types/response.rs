//! Response types for queries and ingestion

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::document::FileType;

/// Approximate token counts for one chain invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt context
    pub input_tokens: usize,
    /// Tokens in the model output
    pub output_tokens: usize,
    /// Always `input_tokens + output_tokens`
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a usage record; the total is derived
    pub fn new(input_tokens: usize, output_tokens: usize) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }

    /// Sum two usage records
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.input_tokens + other.input_tokens,
            self.output_tokens + other.output_tokens,
        )
    }
}

/// Per-stage and aggregate token usage for one query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsageReport {
    /// Usage of the summary stage
    pub summary: TokenUsage,
    /// Usage of the recommendation stage
    pub recommendations: TokenUsage,
    /// Sum of both stages
    pub total: TokenUsage,
}

impl TokenUsageReport {
    /// Build a report from the two stage usages
    pub fn new(summary: TokenUsage, recommendations: TokenUsage) -> Self {
        let total = summary.add(&recommendations);
        Self {
            summary,
            recommendations,
            total,
        }
    }
}

/// Response from a RAG query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated summary of the retrieved context
    pub summary: String,
    /// Generated recommendations
    pub recommendations: Vec<String>,
    /// Source filename of each retrieved chunk, in retrieval order
    pub sources: Vec<String>,
    /// Token accounting for both stages
    pub token_usage: TokenUsageReport,
    /// Number of chunks retrieved for context
    pub chunks_retrieved: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl QueryResponse {
    /// Response returned when the store yields no context for the query
    pub fn no_context(processing_time_ms: u64) -> Self {
        Self {
            summary: "No relevant documents were found for this query.".to_string(),
            recommendations: Vec::new(),
            sources: Vec::new(),
            token_usage: TokenUsageReport::default(),
            chunks_retrieved: 0,
            processing_time_ms,
        }
    }
}

/// A successfully ingested file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedFile {
    /// Original filename
    pub filename: String,
    /// Detected file type
    pub file_type: FileType,
    /// Number of chunks stored
    pub chunks: usize,
}

/// A file that failed during batch ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestFailure {
    /// Filename of the failed entry
    pub filename: String,
    /// Error message
    pub error: String,
}

/// Outcome of a directory ingestion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    /// Files stored successfully
    pub files: Vec<IngestedFile>,
    /// Files that failed, recorded without aborting the batch
    pub failures: Vec<IngestFailure>,
    /// Total chunks stored across all files
    pub total_chunks: usize,
}

/// Result of single-document analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Model output with the five labeled sections
    pub analysis: String,
    /// Metadata of the analyzed document
    pub metadata: HashMap<String, serde_json::Value>,
}
