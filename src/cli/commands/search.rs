//! Search command implementation.

use super::{build_ranker, load_corpus};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    query: &str,
    transcript: Option<&str>,
    references: Option<&str>,
    chunks: Option<&str>,
    max_chunks: Option<usize>,
    lexical: bool,
    mut settings: Settings,
) -> Result<()> {
    if lexical {
        settings.embedding.enabled = false;
    }
    if max_chunks.is_some() {
        settings.retrieval.max_chunks = max_chunks;
    }

    let corpus = load_corpus(&settings, transcript, references, chunks)?;
    let ranker = build_ranker(&settings);

    let spinner = Output::spinner("Ranking context...");
    let results = ranker
        .rank(query, &corpus.chunks, &corpus.references, &corpus.speakers)
        .await;
    spinner.finish_and_clear();

    match results {
        Ok(contexts) => {
            if contexts.is_empty() {
                Output::warning("No relevant context found for your query.");
            } else {
                Output::success(&format!("Found {} context items", contexts.len()));
                for context in &contexts {
                    Output::context_item(context.source.label(), context.score, &context.text);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
