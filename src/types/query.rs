//! Query request types

use serde::{Deserialize, Serialize};

/// Query request for RAG analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The query text
    pub text: String,

    /// Number of chunks to retrieve (default: 5)
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    5
}

impl QueryRequest {
    /// Create a new query with the default k
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            k: default_k(),
        }
    }

    /// Set the number of chunks to retrieve
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }
}
