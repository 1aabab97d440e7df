//! Application state for the RAG server

use std::sync::Arc;

use crate::analysis::{ConversationMemory, DocumentAnalyzer, HeuristicTokenCounter};
use crate::config::RagConfig;
use crate::engine::QueryEngine;
use crate::error::Result;
use crate::ingestion::IngestPipeline;
use crate::providers::{
    EmbeddingProvider, InMemoryVectorStore, LlmProvider, OllamaClient, OllamaEmbedder, OllamaLlm,
    VectorStoreProvider,
};
use crate::retrieval::VectorIndex;

/// Default dimensionality of nomic-embed-text vectors
const EMBEDDING_DIMENSIONS: usize = 768;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Retrieval adapter over the embedding and store providers
    index: Arc<VectorIndex>,
    /// Ingestion pipeline
    pipeline: IngestPipeline,
    /// Query engine
    engine: QueryEngine,
    /// Chain stages for single-document analysis
    analyzer: Arc<DocumentAnalyzer>,
    /// Session conversation memory, passed into each query
    memory: Arc<ConversationMemory>,
}

impl AppState {
    /// Create new application state with Ollama providers and the
    /// in-process vector store
    pub async fn new(config: RagConfig) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing RAG application state...");

        let client = Arc::new(OllamaClient::new(&config.llm));
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::from_client(
            Arc::clone(&client),
            EMBEDDING_DIMENSIONS,
        ));
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaLlm::from_client(
            client,
            config.llm.generate_model.clone(),
        ));
        tracing::info!(
            "Ollama providers initialized (embed: {}, generate: {})",
            config.llm.embed_model,
            config.llm.generate_model
        );

        let store: Arc<dyn VectorStoreProvider> = Arc::new(InMemoryVectorStore::new());
        let index = Arc::new(VectorIndex::new(embedder, store));
        tracing::info!("Vector index initialized");

        let pipeline = IngestPipeline::new(&config.chunking, Arc::clone(&index));

        let analyzer = Arc::new(DocumentAnalyzer::new(llm, Arc::new(HeuristicTokenCounter)));
        let engine = QueryEngine::new(Arc::clone(&index), Arc::clone(&analyzer));

        let memory = Arc::new(match config.memory.max_turns {
            Some(max) => ConversationMemory::with_max_turns(max),
            None => ConversationMemory::new(),
        });

        std::fs::create_dir_all(&config.server.staging_dir)?;
        tracing::info!(
            "Staging directory ready at {}",
            config.server.staging_dir.display()
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                index,
                pipeline,
                engine,
                analyzer,
                memory,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the vector index
    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.inner.index
    }

    /// Get the ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get the query engine
    pub fn engine(&self) -> &QueryEngine {
        &self.inner.engine
    }

    /// Get the document analyzer
    pub fn analyzer(&self) -> &Arc<DocumentAnalyzer> {
        &self.inner.analyzer
    }

    /// Get the session conversation memory
    pub fn memory(&self) -> &Arc<ConversationMemory> {
        &self.inner.memory
    }
}
