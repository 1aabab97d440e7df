//! Conversation memory shared across chain invocations

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The querying user
    User,
    /// The generative model
    Assistant,
}

/// One query/response turn in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker role
    pub role: Role,
    /// Turn text
    pub content: String,
    /// When the turn was recorded
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Append-only ordered log of conversation turns
///
/// One memory is shared by all chain invocations within a session and is
/// passed explicitly into each call, never held as global state. Appends
/// serialize behind the lock, so concurrent queries cannot interleave a
/// half-written turn ordering.
pub struct ConversationMemory {
    turns: Mutex<Vec<Turn>>,
    /// Oldest turns are evicted past this count; None keeps everything
    max_turns: Option<usize>,
}

impl ConversationMemory {
    /// Create an unbounded memory
    pub fn new() -> Self {
        Self {
            turns: Mutex::new(Vec::new()),
            max_turns: None,
        }
    }

    /// Create a memory that keeps at most `max_turns` turns
    pub fn with_max_turns(max_turns: usize) -> Self {
        Self {
            turns: Mutex::new(Vec::new()),
            max_turns: Some(max_turns),
        }
    }

    /// Append a turn, evicting the oldest if the cap is exceeded
    pub fn append(&self, turn: Turn) {
        let mut turns = self.turns.lock();
        turns.push(turn);
        if let Some(max) = self.max_turns {
            if turns.len() > max {
                let excess = turns.len() - max;
                turns.drain(..excess);
            }
        }
    }

    /// All turns in insertion order, oldest first
    pub fn history(&self) -> Vec<Turn> {
        self.turns.lock().clone()
    }

    /// Number of recorded turns
    pub fn len(&self) -> usize {
        self.turns.lock().len()
    }

    /// Whether no turns have been recorded
    pub fn is_empty(&self) -> bool {
        self.turns.lock().is_empty()
    }

    /// Render the history as a chat transcript for prompt injection
    pub fn render(&self) -> String {
        self.turns
            .lock()
            .iter()
            .map(|turn| match turn.role {
                Role::User => format!("Human: {}", turn.content),
                Role::Assistant => format!("AI: {}", turn.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_preserves_insertion_order() {
        let memory = ConversationMemory::new();
        memory.append(Turn::user("what is the default rate?"));
        memory.append(Turn::assistant("the default rate is 2%"));
        memory.append(Turn::user("and the late fee?"));

        let history = memory.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "what is the default rate?");
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[2].content, "and the late fee?");
    }

    #[test]
    fn test_new_memory_is_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.render(), "");
    }

    #[test]
    fn test_render_chat_transcript() {
        let memory = ConversationMemory::new();
        memory.append(Turn::user("hello"));
        memory.append(Turn::assistant("hi there"));
        assert_eq!(memory.render(), "Human: hello\nAI: hi there");
    }

    #[test]
    fn test_cap_evicts_oldest_first() {
        let memory = ConversationMemory::with_max_turns(2);
        memory.append(Turn::user("one"));
        memory.append(Turn::assistant("two"));
        memory.append(Turn::user("three"));

        let history = memory.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "two");
        assert_eq!(history[1].content, "three");
    }

    #[test]
    fn test_shared_handle_sees_appends() {
        use std::sync::Arc;

        let memory = Arc::new(ConversationMemory::new());
        let writer = Arc::clone(&memory);
        writer.append(Turn::user("ping"));
        assert_eq!(memory.len(), 1);
    }
}
