//! Document upload and ingestion endpoints

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{IngestReport, IngestedFile};

/// Response for a single uploaded document
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Human-readable outcome
    pub message: String,
    /// The ingested file
    pub file: IngestedFile,
}

/// POST /api/upload - Upload and process a single document
///
/// Persists the raw bytes to the staging directory, then runs the
/// single-file ingestion path. A failure anywhere is reported as one
/// error with nothing committed to the vector store.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };

        // Keep only the final component of a client-supplied name
        let filename = Path::new(&filename)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::InvalidRequest("Invalid filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::InvalidRequest(format!("Failed to read file: {}", e)))?;

        tracing::info!("Uploading file: {} ({} bytes)", filename, data.len());

        let staged = state.config().server.staging_dir.join(&filename);
        tokio::fs::write(&staged, &data).await?;

        let file = state.pipeline().ingest_file(&staged).await?;

        return Ok(Json(UploadResponse {
            message: format!("Successfully processed {}", filename),
            file,
        }));
    }

    Err(Error::InvalidRequest("No file field in upload".to_string()))
}

/// Request for path-based ingestion
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Path to a document or a directory of documents
    pub path: PathBuf,
}

/// POST /api/ingest - Ingest a file or directory by path
pub async fn ingest_path(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestReport>> {
    let metadata = tokio::fs::metadata(&request.path).await.map_err(|e| {
        Error::InvalidRequest(format!("Cannot access {}: {}", request.path.display(), e))
    })?;

    if metadata.is_dir() {
        let report = state.pipeline().ingest_dir(&request.path).await?;
        tracing::info!(
            "Directory ingestion finished: {} ok, {} failed",
            report.files.len(),
            report.failures.len()
        );
        Ok(Json(report))
    } else {
        let file = state.pipeline().ingest_file(&request.path).await?;
        Ok(Json(IngestReport {
            total_chunks: file.chunks,
            files: vec![file],
            failures: Vec::new(),
        }))
    }
}
