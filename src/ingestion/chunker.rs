//! Text chunking with separator-aware boundaries and overlap

use crate::types::{Chunk, Document};

/// Separator priority for chunk boundaries: paragraph break, line break, space
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Text chunker with configurable size and overlap
///
/// Chunks are contiguous substrings of the input: each is at most
/// `chunk_size` characters and starts `chunk_overlap` characters before
/// the end of its predecessor, so concatenating chunks with the overlap
/// prefix of each subsequent chunk removed reproduces the input exactly.
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a new chunker; `chunk_overlap` must be smaller than `chunk_size`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split text into overlapping pieces of at most `chunk_size` characters
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character, plus an end sentinel, so the
        // window arithmetic runs in characters while slicing stays on
        // valid UTF-8 boundaries.
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        let total = offsets.len() - 1;

        let mut pieces = Vec::new();
        let mut start = 0usize;
        loop {
            if total - start <= self.chunk_size {
                pieces.push(text[offsets[start]..].to_string());
                break;
            }
            let end = self.break_point(text, &offsets, start);
            pieces.push(text[offsets[start]..offsets[end]].to_string());
            if end == total {
                break;
            }
            start = end - self.chunk_overlap;
        }

        pieces
    }

    /// Split a document into chunks inheriting its metadata
    pub fn split_document(&self, doc: &Document) -> Vec<Chunk> {
        self.split(&doc.content)
            .into_iter()
            .map(|piece| Chunk::new(piece, doc.metadata.clone()))
            .collect()
    }

    /// Choose the character index ending the chunk that starts at `start`
    ///
    /// Prefers the last occurrence of the highest-priority separator inside
    /// the window, splitting after the separator; a window with no usable
    /// separator is hard-cut at `chunk_size` characters.
    fn break_point(&self, text: &str, offsets: &[usize], start: usize) -> usize {
        let window_start = offsets[start];
        let window_end = offsets[start + self.chunk_size];
        let window = &text[window_start..window_end];

        for sep in SEPARATORS {
            if let Some(pos) = window.rfind(sep) {
                let end_byte = window_start + pos + sep.len();
                let end = match offsets.binary_search(&end_byte) {
                    Ok(i) => i,
                    Err(_) => continue,
                };
                // The chunk must extend past the overlap, otherwise the
                // next chunk would not advance.
                if end > start + self.chunk_overlap {
                    return end;
                }
            }
        }

        start + self.chunk_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    /// Rebuild the original text: first chunk whole, each later chunk
    /// minus its overlap prefix.
    fn reconstruct(pieces: &[String], overlap: usize) -> String {
        let mut out = String::new();
        for (i, piece) in pieces.iter().enumerate() {
            if i == 0 {
                out.push_str(piece);
            } else {
                out.extend(piece.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(1000, 200);
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn test_short_input_is_a_single_chunk() {
        let chunker = TextChunker::new(1000, 200);
        let pieces = chunker.split("a short paragraph");
        assert_eq!(pieces, vec!["a short paragraph".to_string()]);
    }

    #[test]
    fn test_hard_cut_without_separators() {
        let chunker = TextChunker::new(1000, 200);
        let text = "a".repeat(2500);
        let pieces = chunker.split(&text);

        let lengths: Vec<usize> = pieces.iter().map(|p| char_len(p)).collect();
        assert_eq!(lengths, vec![1000, 1000, 900]);
        assert_eq!(reconstruct(&pieces, 200), text);
    }

    #[test]
    fn test_consecutive_chunks_share_exact_overlap() {
        let chunker = TextChunker::new(1000, 200);
        let text: String = (0..250)
            .map(|i| format!("sentence number {} of the loan agreement. ", i))
            .collect();
        let pieces = chunker.split(&text);
        assert!(pieces.len() > 1);

        for pair in pieces.windows(2) {
            let tail: String = pair[0]
                .chars()
                .skip(char_len(&pair[0]) - 200)
                .collect();
            let head: String = pair[1].chars().take(200).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_lossless_reconstruction_and_size_bound() {
        let chunker = TextChunker::new(300, 60);
        let text: String = (0..40)
            .map(|i| format!("Paragraph {} covers interest rates and repayment.\n\n", i))
            .collect();
        let pieces = chunker.split(&text);

        for piece in &pieces {
            assert!(char_len(piece) <= 300);
        }
        assert_eq!(reconstruct(&pieces, 60), text);
    }

    #[test]
    fn test_prefers_paragraph_breaks() {
        let chunker = TextChunker::new(100, 20);
        let first = format!("{}\n\n", "x".repeat(60));
        let text = format!("{}{}", first, "y ".repeat(100));
        let pieces = chunker.split(&text);

        // The window holds a paragraph break, so the first chunk ends there.
        assert_eq!(pieces[0], first);
    }

    #[test]
    fn test_hard_cut_respects_utf8_boundaries() {
        let chunker = TextChunker::new(1000, 200);
        let text = "é".repeat(1500);
        let pieces = chunker.split(&text);

        for piece in &pieces {
            assert!(char_len(piece) <= 1000);
        }
        assert_eq!(reconstruct(&pieces, 200), text);
    }

    #[test]
    fn test_split_document_inherits_metadata() {
        let chunker = TextChunker::new(50, 10);
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), serde_json::json!("terms.txt"));
        let doc = Document::with_metadata("word ".repeat(40), metadata);

        let chunks = chunker.split_document(&doc);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(chunk.source(), Some("terms.txt"));
        }
    }
}
