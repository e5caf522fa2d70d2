//! Ask command implementation.

use super::{build_ranker, load_corpus};
use crate::cli::Output;
use crate::config::Settings;
use crate::generation::{ConversationTurn, Generator, OpenAIGenerator};
use crate::retrieval::assemble_context;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    transcript: Option<&str>,
    references: Option<&str>,
    chunks: Option<&str>,
    model: Option<String>,
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

    let model = model.unwrap_or_else(|| settings.generation.model.clone());
    let generator = OpenAIGenerator::new(
        &model,
        settings.generation.temperature,
        &settings.prompts.query.system,
    );

    let spinner = Output::spinner("Consulting the lore...");

    let contexts = match ranker
        .rank(question, &corpus.chunks, &corpus.references, &corpus.speakers)
        .await
    {
        Ok(contexts) => contexts,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Retrieval failed: {}", e));
            return Err(e.into());
        }
    };

    let context_block = assemble_context(&contexts, settings.retrieval.max_context_length);
    let prompt = settings.prompts.render_query(question, &context_block);

    match generator.generate(&[ConversationTurn::user(prompt)]).await {
        Ok(answer) => {
            spinner.finish_and_clear();

            println!("\n{}\n", answer);

            if !contexts.is_empty() {
                Output::header("Context used");
                for context in &contexts {
                    Output::context_item(context.source.label(), context.score, &context.text);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
