//! Interactive chat command.

use super::{build_ranker, load_corpus};
use crate::cli::Output;
use crate::config::Settings;
use crate::generation::OpenAIGenerator;
use crate::session::{ConversationSession, TurnOutcome};
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Run the interactive chat command.
pub async fn run_chat(
    transcript: Option<&str>,
    references: Option<&str>,
    chunks: Option<&str>,
    model: Option<String>,
    lexical: bool,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if lexical {
        settings.embedding.enabled = false;
    }

    let corpus = Arc::new(load_corpus(&settings, transcript, references, chunks)?);
    let ranker = build_ranker(&settings);

    let model = model.unwrap_or_else(|| settings.generation.model.clone());
    let generator = Arc::new(OpenAIGenerator::new(
        &model,
        settings.generation.temperature,
        &settings.prompts.query.system,
    ));

    let mut session = ConversationSession::new(
        corpus,
        ranker,
        generator,
        settings.prompts.clone(),
        settings.retrieval.max_context_length,
    );

    println!("\n{}", style("Skald").bold().cyan());
    println!(
        "{}\n",
        style("Ask about the game world and its characters. Type 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            // End of input stream.
            break;
        }

        match session.handle_input(&input).await {
            Ok(TurnOutcome::Idle) => continue,
            Ok(TurnOutcome::Terminated) => {
                Output::info("Goodbye!");
                break;
            }
            Ok(TurnOutcome::Reply(reply)) => {
                println!("\n{} {}\n", style("Skald:").cyan().bold(), reply);
            }
            Err(e) => {
                // The session stays alive; the user can retry the query.
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
