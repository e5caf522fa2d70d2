//! Transcript chunking for breaking dialogue text into retrievable segments.
//!
//! Splits raw transcripts into overlapping, sentence-aligned chunks and
//! extracts the set of speakers appearing in the dialogue.

mod sentence;
mod speakers;

pub use sentence::SentenceWindowChunker;
pub use speakers::extract_speakers;

use crate::error::{Result, SkaldError};
use serde::{Deserialize, Serialize};

/// A contiguous span of transcript sentences treated as one retrievable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptChunk {
    /// 0-based emission order.
    pub id: u64,
    /// Joined sentence text of this chunk.
    pub text: String,
    /// Index of the first sentence covered by this chunk.
    pub start_sentence: usize,
    /// Index of the last sentence covered by this chunk (inclusive).
    pub end_sentence: usize,
    /// Character count of the joined text.
    pub char_count: usize,
}

/// Configuration for sentence-window chunking.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    /// Number of sentence units per chunk window.
    pub chunk_size: usize,
    /// Number of sentence units shared between adjacent windows.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl ChunkingConfig {
    /// Check that the window parameters describe a forward-advancing window.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SkaldError::Config(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(SkaldError::Config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}
