//! Shared data types

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, Document, FileType};
pub use query::QueryRequest;
pub use response::{
    DocumentAnalysis, IngestReport, IngestedFile, IngestFailure, QueryResponse, TokenUsage,
    TokenUsageReport,
};
