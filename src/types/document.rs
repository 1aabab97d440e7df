//! Document and chunk types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// HTML document
    Html,
    /// Plain text file
    Txt,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "html" | "htm" => Some(Self::Html),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Lowercase tag used in chunk metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Html => "html",
            Self::Txt => "txt",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Html => "HTML",
            Self::Txt => "Text File",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded document before chunking
///
/// Immutable once created; owned by the ingestion pipeline until it is
/// split into chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Extracted text content
    pub content: String,
    /// Document metadata
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Document {
    /// Create a new document with empty metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Create a new document with metadata
    pub fn with_metadata(
        content: impl Into<String>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

/// A bounded-length segment of a document, the unit stored and retrieved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub content: String,
    /// Chunk metadata, including `source` and `file_type` once ingested
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: impl Into<String>, metadata: HashMap<String, serde_json::Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            metadata,
        }
    }

    /// The original filename this chunk came from, if stamped
    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("pdf"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("htm"), Some(FileType::Html));
        assert_eq!(FileType::from_extension("xlsx"), None);
    }

    #[test]
    fn test_chunk_source() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), serde_json::json!("report.pdf"));
        let chunk = Chunk::new("text", metadata);
        assert_eq!(chunk.source(), Some("report.pdf"));

        let bare = Chunk::new("text", HashMap::new());
        assert_eq!(bare.source(), None);
    }
}
