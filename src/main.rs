//! Skald CLI entry point.

use anyhow::Result;
use clap::Parser;
use skald::cli::{commands, Cli, Commands};
use skald::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("skald={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Chunk { transcript, output } => {
            commands::run_chunk(transcript.as_deref(), output.clone(), settings)?;
        }

        Commands::Speakers { transcript } => {
            commands::run_speakers(transcript.as_deref(), settings)?;
        }

        Commands::Search {
            query,
            transcript,
            references,
            chunks,
            max_chunks,
            lexical,
        } => {
            commands::run_search(
                query,
                transcript.as_deref(),
                references.as_deref(),
                chunks.as_deref(),
                *max_chunks,
                *lexical,
                settings,
            )
            .await?;
        }

        Commands::Ask {
            question,
            transcript,
            references,
            chunks,
            model,
            max_chunks,
            lexical,
        } => {
            commands::run_ask(
                question,
                transcript.as_deref(),
                references.as_deref(),
                chunks.as_deref(),
                model.clone(),
                *max_chunks,
                *lexical,
                settings,
            )
            .await?;
        }

        Commands::Chat {
            transcript,
            references,
            chunks,
            model,
            lexical,
        } => {
            commands::run_chat(
                transcript.as_deref(),
                references.as_deref(),
                chunks.as_deref(),
                model.clone(),
                *lexical,
                settings,
            )
            .await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
