//! Chain stages with token accounting

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;
use crate::types::{Chunk, Document, DocumentAnalysis, TokenUsage};

use super::chain::LlmChain;
use super::memory::ConversationMemory;
use super::template::PromptTemplate;
use super::tokens::TokenCounter;

/// Runs the summary, recommendation, and single-document analysis
/// stages, accounting tokens for each invocation
pub struct DocumentAnalyzer {
    summary_chain: LlmChain,
    recommendation_chain: LlmChain,
    analysis_chain: LlmChain,
    tokens: Arc<dyn TokenCounter>,
}

impl DocumentAnalyzer {
    /// Create an analyzer over a model provider and a token counter
    pub fn new(llm: Arc<dyn LlmProvider>, tokens: Arc<dyn TokenCounter>) -> Self {
        Self {
            summary_chain: LlmChain::new(PromptTemplate::summary(), Arc::clone(&llm)),
            recommendation_chain: LlmChain::new(PromptTemplate::recommendation(), Arc::clone(&llm)),
            analysis_chain: LlmChain::new(PromptTemplate::document_analysis(), llm),
            tokens,
        }
    }

    fn join_chunks(chunks: &[Chunk]) -> String {
        chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Source filename of each chunk in order, `"Unknown"` when absent
    pub fn sources(chunks: &[Chunk]) -> Vec<String> {
        chunks
            .iter()
            .map(|c| c.source().unwrap_or("Unknown").to_string())
            .collect()
    }

    /// Summarize the retrieved context
    ///
    /// Input tokens cover the concatenated chunk text, output tokens the
    /// generated summary.
    pub async fn summarize(&self, chunks: &[Chunk]) -> Result<(String, TokenUsage)> {
        let doc_text = Self::join_chunks(chunks);
        let input_tokens = self.tokens.count(&doc_text);

        let mut variables = HashMap::new();
        variables.insert("documents".to_string(), doc_text);
        let summary = self.summary_chain.run(&variables).await?;

        let output_tokens = self.tokens.count(&summary);
        Ok((summary, TokenUsage::new(input_tokens, output_tokens)))
    }

    /// Generate recommendations for a query over the retrieved context
    ///
    /// Consults the conversation memory and records the exchange on
    /// success. Input tokens cover the chunk text plus the query.
    pub async fn recommend(
        &self,
        chunks: &[Chunk],
        query: &str,
        memory: &ConversationMemory,
    ) -> Result<(String, TokenUsage)> {
        let doc_text = Self::join_chunks(chunks);
        let input_tokens = self.tokens.count(&doc_text) + self.tokens.count(query);

        let mut variables = HashMap::new();
        variables.insert("documents".to_string(), doc_text);
        variables.insert("query".to_string(), query.to_string());
        let response = self
            .recommendation_chain
            .run_with_memory(&variables, memory)
            .await?;

        let output_tokens = self.tokens.count(&response);
        Ok((response, TokenUsage::new(input_tokens, output_tokens)))
    }

    /// Run the five-section analysis over a single document
    pub async fn analyze(&self, document: &Document) -> Result<DocumentAnalysis> {
        let mut variables = HashMap::new();
        variables.insert("document".to_string(), document.content.clone());
        let analysis = self.analysis_chain.run(&variables).await?;

        Ok(DocumentAnalysis {
            analysis,
            metadata: document.metadata.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokens::HeuristicTokenCounter;
    use crate::providers::testing::FakeLlm;

    fn chunk(content: &str, source: Option<&str>) -> Chunk {
        let mut metadata = HashMap::new();
        if let Some(source) = source {
            metadata.insert("source".to_string(), serde_json::json!(source));
        }
        Chunk::new(content, metadata)
    }

    fn analyzer(llm: Arc<FakeLlm>) -> DocumentAnalyzer {
        DocumentAnalyzer::new(llm, Arc::new(HeuristicTokenCounter))
    }

    #[tokio::test]
    async fn test_summarize_counts_input_and_output() {
        let llm = Arc::new(FakeLlm::new(&["short summary"]));
        let analyzer = analyzer(llm.clone());

        let chunks = vec![
            chunk("first chunk text", Some("a.txt")),
            chunk("second chunk text", Some("b.txt")),
        ];
        let (summary, usage) = analyzer.summarize(&chunks).await.unwrap();

        assert_eq!(summary, "short summary");
        // "first chunk text\n\nsecond chunk text" = 6 words
        assert_eq!(usage.input_tokens, 6);
        assert_eq!(usage.output_tokens, 2);
        assert_eq!(usage.total_tokens, 8);

        // Both chunks flow into the prompt, paragraph-joined
        let prompts = llm.prompts.lock();
        assert!(prompts[0].contains("first chunk text\n\nsecond chunk text"));
    }

    #[tokio::test]
    async fn test_recommend_counts_query_and_saves_turns() {
        let memory = ConversationMemory::new();
        let llm = Arc::new(FakeLlm::new(&["diversify holdings"]));
        let analyzer = analyzer(llm);

        let chunks = vec![chunk("portfolio statement", Some("q3.pdf"))];
        let (response, usage) = analyzer
            .recommend(&chunks, "how should I rebalance?", &memory)
            .await
            .unwrap();

        assert_eq!(response, "diversify holdings");
        // 2 context words + 4 query words + "?"
        assert_eq!(usage.input_tokens, 7);
        assert_eq!(usage.output_tokens, 2);
        assert_eq!(memory.len(), 2);
    }

    #[tokio::test]
    async fn test_sources_default_to_unknown() {
        let chunks = vec![
            chunk("a", Some("loans.pdf")),
            chunk("b", None),
            chunk("c", Some("loans.pdf")),
        ];
        assert_eq!(
            DocumentAnalyzer::sources(&chunks),
            vec!["loans.pdf", "Unknown", "loans.pdf"]
        );
    }

    #[tokio::test]
    async fn test_analyze_returns_document_metadata() {
        let llm = Arc::new(FakeLlm::new(&["1. Key points..."]));
        let analyzer = analyzer(llm);

        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), serde_json::json!("lease.docx"));
        let doc = Document::with_metadata("lease terms", metadata);

        let analysis = analyzer.analyze(&doc).await.unwrap();
        assert_eq!(analysis.analysis, "1. Key points...");
        assert_eq!(
            analysis.metadata.get("source"),
            Some(&serde_json::json!("lease.docx"))
        );
    }
}
