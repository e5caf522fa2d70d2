//! Chunk command implementation.

use super::read_transcript;
use crate::chunking::{extract_speakers, SentenceWindowChunker};
use crate::cli::Output;
use crate::config::Settings;
use crate::corpus::ChunkStore;
use anyhow::Result;

/// Run the chunk command.
pub fn run_chunk(
    transcript: Option<&str>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    let text = read_transcript(&settings, transcript)?;

    let chunker = SentenceWindowChunker::new(settings.chunking.to_config())?;
    let store = ChunkStore::from_chunks(chunker.chunk(&text))?;
    let speakers = extract_speakers(&text);

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            store.save_to(&path)?;
            Output::success(&format!("Wrote partition map to {}", path.display()));
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&store)?);
        }
    }

    let stats = store.stats();
    Output::header("Corpus");
    Output::kv("chunks", &stats.total_chunks.to_string());
    Output::kv("characters", &stats.total_characters.to_string());
    Output::kv("speakers", &speakers.len().to_string());

    Ok(())
}
