//! Command implementations for the Skald CLI.

mod ask;
mod chat;
mod chunk;
mod config;
mod search;
mod speakers;

pub use ask::run_ask;
pub use chat::run_chat;
pub use chunk::run_chunk;
pub use config::run_config;
pub use search::run_search;
pub use speakers::run_speakers;

use crate::chunking::{extract_speakers, SentenceWindowChunker};
use crate::config::Settings;
use crate::corpus::{load_references, ChunkStore, Corpus, ReferenceLibrary};
use crate::embedding::OpenAIEmbedder;
use crate::error::{Result, SkaldError};
use crate::retrieval::ContextRanker;
use std::sync::Arc;

/// Resolve a path argument against the config's corpus defaults.
fn resolve_path(flag: Option<&str>, fallback: &Option<String>) -> Option<String> {
    flag.map(str::to_string).or_else(|| fallback.clone())
}

/// Read the transcript named by a flag or the config file.
pub(crate) fn read_transcript(settings: &Settings, flag: Option<&str>) -> Result<String> {
    let path = resolve_path(flag, &settings.corpus.transcript_path).ok_or_else(|| {
        SkaldError::Config(
            "no transcript given; pass a path or set corpus.transcript_path".to_string(),
        )
    })?;
    Ok(std::fs::read_to_string(Settings::expand_path(&path))?)
}

/// Load the corpus a query command runs against.
///
/// A prebuilt partition map takes precedence over chunking the raw
/// transcript; the transcript is still read for speaker extraction when
/// available.
pub(crate) fn load_corpus(
    settings: &Settings,
    transcript: Option<&str>,
    references: Option<&str>,
    chunks: Option<&str>,
) -> Result<Corpus> {
    let mut corpus = match chunks {
        Some(chunks_path) => {
            let store = ChunkStore::load_from(&Settings::expand_path(chunks_path))?;
            let speakers = match read_transcript(settings, transcript) {
                Ok(text) => extract_speakers(&text),
                Err(_) => Vec::new(),
            };
            Corpus {
                chunks: store,
                references: ReferenceLibrary::new(),
                speakers,
            }
        }
        None => {
            let text = read_transcript(settings, transcript)?;
            let chunker = SentenceWindowChunker::new(settings.chunking.to_config())?;
            Corpus::build(&text, &chunker)?
        }
    };

    if let Some(path) = resolve_path(references, &settings.corpus.references_path) {
        corpus = corpus.with_references(load_references(&Settings::expand_path(&path))?);
    }

    Ok(corpus)
}

/// Build a ranker for the configured scoring mode.
pub(crate) fn build_ranker(settings: &Settings) -> ContextRanker {
    let config = settings.retrieval_config();

    if settings.embedding.enabled {
        let embedder = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));
        ContextRanker::semantic(embedder, config)
    } else {
        ContextRanker::lexical(config)
    }
}
