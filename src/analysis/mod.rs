//! Prompt-chain orchestration: templates, memory, token accounting

pub mod analyzer;
pub mod chain;
pub mod memory;
pub mod template;
pub mod tokens;

pub use analyzer::DocumentAnalyzer;
pub use chain::LlmChain;
pub use memory::{ConversationMemory, Role, Turn};
pub use template::PromptTemplate;
pub use tokens::{HeuristicTokenCounter, TokenCounter};
