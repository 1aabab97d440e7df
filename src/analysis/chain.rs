//! Single-stage prompt chains over the generative model

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;

use super::memory::{ConversationMemory, Turn};
use super::template::PromptTemplate;

/// One orchestrated invocation of the generative model
///
/// Binds variables into a fixed template, invokes the model, and returns
/// the raw text response. The memory-aware variant renders prior turns
/// into the `chat_history` variable and records the exchange afterwards.
pub struct LlmChain {
    template: PromptTemplate,
    llm: Arc<dyn LlmProvider>,
}

impl LlmChain {
    /// Create a chain from a template and a model provider
    pub fn new(template: PromptTemplate, llm: Arc<dyn LlmProvider>) -> Self {
        Self { template, llm }
    }

    /// Template driving this chain
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Render the template and invoke the model
    pub async fn run(&self, variables: &HashMap<String, String>) -> Result<String> {
        let prompt = self.template.render(variables)?;
        self.llm.generate(&prompt).await
    }

    /// Run with conversation memory
    ///
    /// The history is rendered into `chat_history` before substitution.
    /// On success the bound `query` and the model response are appended
    /// to the memory as new turns.
    pub async fn run_with_memory(
        &self,
        variables: &HashMap<String, String>,
        memory: &ConversationMemory,
    ) -> Result<String> {
        let mut variables = variables.clone();
        variables.insert("chat_history".to_string(), memory.render());

        let prompt = self.template.render(&variables)?;
        let output = self.llm.generate(&prompt).await?;

        if let Some(query) = variables.get("query") {
            memory.append(Turn::user(query.clone()));
            memory.append(Turn::assistant(output.clone()));
        }

        Ok(output)
    }
}
