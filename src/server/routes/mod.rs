//! API routes for the RAG server

pub mod analyze;
pub mod history;
pub mod ingest;
pub mod query;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for multipart file uploads
        .route(
            "/upload",
            post(ingest::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Ingestion by path (file or directory)
        .route("/ingest", post(ingest::ingest_path))
        // Query
        .route("/query", post(query::query_documents))
        // Single-document analysis
        .route("/analyze", post(analyze::analyze_document))
        // Conversation history
        .route("/chat-history", get(history::get_chat_history))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "bank-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A with summaries, recommendations, and conversation memory",
        "endpoints": {
            "POST /api/upload": "Upload and process a single document",
            "POST /api/ingest": "Ingest a file or directory by path",
            "POST /api/query": "Query the document store and get analysis",
            "POST /api/analyze": "Run the five-section analysis on a document",
            "GET /api/chat-history": "Get the conversation history"
        }
    }))
}
