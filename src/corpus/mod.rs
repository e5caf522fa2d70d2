//! Corpus construction: keyed chunk partitions and lore reference pages.
//!
//! A corpus is built once per transcript version and read-only afterwards.
//! Chunks are addressed by stable `chunk_<id>` keys so they can be written
//! to and reloaded from a plain JSON partition map.

use crate::chunking::{extract_speakers, SentenceWindowChunker, TranscriptChunk};
use crate::error::{Result, SkaldError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// An encyclopedia-style lore page with a precomputed embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePage {
    /// Page body text.
    pub text: String,
    /// Embedding vector matching the embedding service's dimensionality.
    pub embedding: Vec<f32>,
}

/// Reference pages keyed by title.
pub type ReferenceLibrary = BTreeMap<String, ReferencePage>;

/// Load a reference library from a JSON file keyed by page title.
pub fn load_references(path: &Path) -> Result<ReferenceLibrary> {
    let content = std::fs::read_to_string(path)?;
    let references: ReferenceLibrary = serde_json::from_str(&content)?;
    info!("Loaded {} reference pages from {}", references.len(), path.display());
    Ok(references)
}

/// Summary statistics over a chunk store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    /// Number of chunks in the store.
    pub total_chunks: usize,
    /// Sum of the chunks' character counts.
    pub total_characters: usize,
}

/// A keyed, read-only collection of transcript chunks.
///
/// Iteration is key-sorted, which is the deterministic traversal order the
/// ranker's tie-breaking is defined against.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChunkStore {
    chunks: BTreeMap<String, TranscriptChunk>,
}

impl ChunkStore {
    /// Partition chunks under stable `chunk_<id>` keys.
    ///
    /// Two chunks colliding on the same key with different content fail
    /// with a validation error; identical collisions are last-write-wins.
    pub fn from_chunks(chunks: Vec<TranscriptChunk>) -> Result<Self> {
        let mut store = BTreeMap::new();

        for chunk in chunks {
            let key = format!("chunk_{}", chunk.id);
            if let Some(existing) = store.get(&key) {
                if *existing != chunk {
                    return Err(SkaldError::Validation(format!(
                        "partition key {} maps to conflicting chunk content",
                        key
                    )));
                }
            }
            store.insert(key, chunk);
        }

        Ok(Self { chunks: store })
    }

    /// Rebuild a store from a previously written partition map.
    ///
    /// Payloads must be JSON objects describing a chunk. An object missing
    /// its `id` takes its position in the key-sorted input instead. Any
    /// other payload shape fails with a validation error.
    pub fn from_partitions(partitions: BTreeMap<String, serde_json::Value>) -> Result<Self> {
        let mut chunks = Vec::with_capacity(partitions.len());

        for (position, (key, payload)) in partitions.into_iter().enumerate() {
            let mut object = match payload {
                serde_json::Value::Object(object) => object,
                other => {
                    return Err(SkaldError::Validation(format!(
                        "partition {} holds unsupported payload type: {}",
                        key,
                        json_type_name(&other)
                    )));
                }
            };

            if !object.contains_key("id") {
                object.insert("id".to_string(), serde_json::json!(position as u64));
            }

            let chunk: TranscriptChunk = serde_json::from_value(serde_json::Value::Object(object))
                .map_err(|e| {
                    SkaldError::Validation(format!("partition {} is malformed: {}", key, e))
                })?;
            chunks.push(chunk);
        }

        Self::from_chunks(chunks)
    }

    /// Load a partition map from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let partitions: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)?;
        let store = Self::from_partitions(partitions)?;
        info!("Loaded {} chunks from {}", store.len(), path.display());
        Ok(store)
    }

    /// Write the partition map to a JSON file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.chunks)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Look up a chunk by its partition key.
    pub fn get(&self, key: &str) -> Option<&TranscriptChunk> {
        self.chunks.get(key)
    }

    /// Iterate chunks in key-sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TranscriptChunk)> {
        self.chunks.iter()
    }

    /// Number of chunks in the store.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the store holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Summary statistics for display.
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            total_chunks: self.chunks.len(),
            total_characters: self.chunks.values().map(|c| c.char_count).sum(),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// The read-only inputs one query ranks against.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Keyed transcript chunks.
    pub chunks: ChunkStore,
    /// Lore pages keyed by title.
    pub references: ReferenceLibrary,
    /// Sorted speaker names extracted from the transcript.
    pub speakers: Vec<String>,
}

impl Corpus {
    /// Chunk and partition a raw transcript, extracting its speakers.
    pub fn build(transcript: &str, chunker: &SentenceWindowChunker) -> Result<Self> {
        let chunks = ChunkStore::from_chunks(chunker.chunk(transcript))?;
        let speakers = extract_speakers(transcript);

        info!(
            "Built corpus: {} chunks, {} speakers",
            chunks.len(),
            speakers.len()
        );

        Ok(Self {
            chunks,
            references: ReferenceLibrary::new(),
            speakers,
        })
    }

    /// Attach a reference library to the corpus.
    pub fn with_references(mut self, references: ReferenceLibrary) -> Self {
        self.references = references;
        self
    }
}
