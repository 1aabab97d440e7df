//! bank-rag: document Q&A with vector retrieval and prompt chains
//!
//! Ingests PDF, DOCX, HTML, and plain-text documents, indexes them for
//! semantic retrieval, and answers queries by running summary and
//! recommendation chains over the retrieved context while tracking token
//! usage and conversation history.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use engine::QueryEngine;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, Document, FileType},
    query::QueryRequest,
    response::{QueryResponse, TokenUsage, TokenUsageReport},
};
