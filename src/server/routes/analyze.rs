//! Single-document analysis endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{Document, DocumentAnalysis};

/// Request carrying a document to analyze
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Document text
    pub content: String,
    /// Optional document metadata
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// POST /api/analyze - Run the five-section analysis on a document
pub async fn analyze_document(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<DocumentAnalysis>> {
    if request.content.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "document content must not be empty".to_string(),
        ));
    }

    let document = Document::with_metadata(request.content, request.metadata);
    let analysis = state.analyzer().analyze(&document).await?;
    Ok(Json(analysis))
}
