//! Sentence-window chunking implementation.
//!
//! Uses a punctuation heuristic to split text into sentence units, then
//! slides an overlapping window across them. This is a best-effort
//! tokenizer, not a parser: abbreviations and ellipses will split early.

use super::{ChunkingConfig, TranscriptChunk};
use crate::error::Result;
use regex::Regex;
use tracing::debug;

/// Sentence-aligned sliding-window chunker.
pub struct SentenceWindowChunker {
    config: ChunkingConfig,
    newline_runs: Regex,
    sentence_boundary: Regex,
}

impl SentenceWindowChunker {
    /// Create a chunker, validating the window configuration.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            newline_runs: Regex::new(r"\n+").expect("valid regex"),
            // Sentence-terminal punctuation followed by whitespace.
            sentence_boundary: Regex::new(r"[.!?]\s+").expect("valid regex"),
        })
    }

    /// Split a transcript into overlapping sentence-aligned chunks.
    ///
    /// Chunk ids are assigned in emission order starting at 0. An empty
    /// transcript yields no chunks; a transcript shorter than the window
    /// yields exactly one chunk covering everything.
    pub fn chunk(&self, transcript: &str) -> Vec<TranscriptChunk> {
        let cleaned = self.newline_runs.replace_all(transcript.trim(), "\n");
        let sentences = self.split_sentences(&cleaned);

        if sentences.is_empty() {
            return Vec::new();
        }

        // Advance by at least one sentence so the window always moves
        // forward, even for degenerate overlap values.
        let advance = self
            .config
            .chunk_size
            .saturating_sub(self.config.overlap)
            .max(1);

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < sentences.len() {
            let end = usize::min(start + self.config.chunk_size, sentences.len());
            let text = sentences[start..end].join(" ");

            chunks.push(TranscriptChunk {
                id: chunks.len() as u64,
                char_count: text.chars().count(),
                start_sentence: start,
                end_sentence: end - 1,
                text,
            });

            // Once a window has covered the last sentence, further windows
            // would only repeat overlapped tail content.
            if end == sentences.len() {
                break;
            }

            start += advance;
        }

        debug!(
            "Chunked {} sentences into {} chunks (size {}, overlap {})",
            sentences.len(),
            chunks.len(),
            self.config.chunk_size,
            self.config.overlap
        );

        chunks
    }

    /// Split text into sentence units at terminal punctuation followed by
    /// whitespace. The punctuation stays with the preceding sentence; the
    /// whitespace is consumed.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in self.sentence_boundary.find_iter(text) {
            // The matched punctuation is a single ASCII byte.
            let end = boundary.start() + 1;
            if end > start {
                sentences.push(&text[start..end]);
            }
            start = boundary.end();
        }

        if start < text.len() {
            sentences.push(&text[start..]);
        }

        sentences
    }
}
