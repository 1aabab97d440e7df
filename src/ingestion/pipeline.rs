//! Document ingestion pipeline

use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::retrieval::VectorIndex;
use crate::types::{IngestFailure, IngestReport, IngestedFile};

use super::chunker::TextChunker;
use super::loader::DocumentLoader;

/// Loads, chunks, stamps, and stores documents
pub struct IngestPipeline {
    chunker: TextChunker,
    index: Arc<VectorIndex>,
}

impl IngestPipeline {
    /// Create a pipeline over a vector index
    pub fn new(chunking: &ChunkingConfig, index: Arc<VectorIndex>) -> Self {
        Self {
            chunker: TextChunker::new(chunking.chunk_size, chunking.chunk_overlap),
            index,
        }
    }

    /// Ingest a single document
    ///
    /// Selects a loader by extension, splits the text, stamps each chunk
    /// with the original filename and file type, and stores the batch.
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestedFile> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let loader = DocumentLoader::for_path(path)?;
        let file_type = loader.file_type();
        let document = loader.load(path)?;

        let mut chunks = self.chunker.split_document(&document);
        for chunk in &mut chunks {
            chunk
                .metadata
                .insert("source".to_string(), serde_json::json!(filename));
            chunk
                .metadata
                .insert("file_type".to_string(), serde_json::json!(file_type));
        }

        self.index.add(&chunks).await?;

        tracing::info!("Ingested {} ({} chunks)", filename, chunks.len());

        Ok(IngestedFile {
            filename,
            file_type,
            chunks: chunks.len(),
        })
    }

    /// Ingest every document in a directory (non-recursive)
    ///
    /// Hidden entries and subdirectories are skipped. A failing file is
    /// recorded in the report and never aborts the batch.
    pub async fn ingest_dir(&self, dir: &Path) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    report.failures.push(IngestFailure {
                        filename: e
                            .path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| dir.display().to_string()),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let filename = entry.file_name().to_string_lossy().to_string();
            if filename.starts_with('.') || !entry.file_type().is_file() {
                continue;
            }

            match self.ingest_file(entry.path()).await {
                Ok(file) => {
                    report.total_chunks += file.chunks;
                    report.files.push(file);
                }
                Err(e) => {
                    tracing::warn!("Error processing {}: {}", filename, e);
                    report.failures.push(IngestFailure {
                        filename,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::FakeEmbedder;
    use crate::providers::InMemoryVectorStore;
    use std::fs;

    fn pipeline_with_store() -> (IngestPipeline, Arc<InMemoryVectorStore>) {
        let store = Arc::new(InMemoryVectorStore::new());
        let index = Arc::new(VectorIndex::new(Arc::new(FakeEmbedder), store.clone()));
        let chunking = ChunkingConfig {
            chunk_size: 100,
            chunk_overlap: 20,
        };
        (IngestPipeline::new(&chunking, index), store)
    }

    #[tokio::test]
    async fn test_ingest_file_stamps_source_and_file_type() {
        let (pipeline, store) = pipeline_with_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.txt");
        fs::write(&path, "the annual percentage rate is listed below ".repeat(10)).unwrap();

        let file = pipeline.ingest_file(&path).await.unwrap();
        assert_eq!(file.filename, "terms.txt");
        assert!(file.chunks > 1);

        use crate::providers::VectorStoreProvider;
        let results = store.search(&[1.0; 32], file.chunks).await.unwrap();
        for result in &results {
            assert_eq!(result.chunk.source(), Some("terms.txt"));
            assert_eq!(
                result.chunk.metadata.get("file_type"),
                Some(&serde_json::json!("txt"))
            );
        }
    }

    #[tokio::test]
    async fn test_ingest_file_unsupported_extension() {
        let (pipeline, _store) = pipeline_with_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.xlsx");
        fs::write(&path, "not really a spreadsheet").unwrap();

        let err = pipeline.ingest_file(&path).await.unwrap_err();
        assert!(matches!(err, crate::error::Error::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_ingest_dir_isolates_failures() {
        let (pipeline, store) = pipeline_with_store();
        let dir = tempfile::tempdir().unwrap();

        fs::write(dir.path().join("good1.txt"), "a loan agreement between parties").unwrap();
        fs::write(dir.path().join("good2.txt"), "an overdraft policy statement").unwrap();
        fs::write(dir.path().join("bad.xlsx"), "unsupported").unwrap();

        let report = pipeline.ingest_dir(dir.path()).await.unwrap();
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].filename, "bad.xlsx");
        assert!(report.total_chunks >= 2);

        use crate::providers::VectorStoreProvider;
        assert_eq!(store.len().await.unwrap(), report.total_chunks);
    }

    #[tokio::test]
    async fn test_ingest_dir_skips_hidden_entries() {
        let (pipeline, _store) = pipeline_with_store();
        let dir = tempfile::tempdir().unwrap();

        fs::write(dir.path().join(".hidden.txt"), "should be skipped").unwrap();
        fs::write(dir.path().join("visible.txt"), "should be ingested").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let report = pipeline.ingest_dir(dir.path()).await.unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].filename, "visible.txt");
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_empty_file_stores_nothing() {
        let (pipeline, store) = pipeline_with_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let file = pipeline.ingest_file(&path).await.unwrap();
        assert_eq!(file.chunks, 0);

        use crate::providers::VectorStoreProvider;
        assert!(store.is_empty().await.unwrap());
    }
}
