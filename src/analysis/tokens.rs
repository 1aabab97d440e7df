//! Approximate token counting for usage reporting

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Pluggable token counting capability
///
/// The default is a deterministic heuristic, not a model tokenizer;
/// swap in an exact tokenizer without touching callers.
pub trait TokenCounter: Send + Sync {
    /// Count approximate tokens in a text string
    fn count(&self, text: &str) -> usize;
}

/// Word-and-punctuation token approximation
///
/// Counts word-like runs plus individual punctuation marks as separate
/// units. Language-agnostic and side-effect-free, so totals are
/// reproducible and summable across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTokenCounter;

impl TokenCounter for HeuristicTokenCounter {
    fn count(&self, text: &str) -> usize {
        WORD_RUNS.find_iter(text).count() + PUNCTUATION.find_iter(text).count()
    }
}
