//! CLI module for Skald.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skald - Game-world question answering
///
/// Answers questions about a game world by retrieving relevant passages
/// from a dialogue transcript and a set of lore reference pages. The name
/// comes from the Norse court poets who kept their world's stories.
#[derive(Parser, Debug)]
#[command(name = "skald")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk a transcript into a keyed partition map
    Chunk {
        /// Path to the raw transcript (falls back to config)
        transcript: Option<String>,

        /// Write the partition map to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the speakers found in a transcript
    Speakers {
        /// Path to the raw transcript (falls back to config)
        transcript: Option<String>,
    },

    /// Rank and display the most relevant context for a query
    Search {
        /// Search query
        query: String,

        /// Path to the raw transcript
        #[arg(short, long)]
        transcript: Option<String>,

        /// Path to the reference-page JSON
        #[arg(short, long)]
        references: Option<String>,

        /// Path to a prebuilt chunk partition map
        #[arg(long)]
        chunks: Option<String>,

        /// Maximum number of context items to return
        #[arg(short = 'k', long)]
        max_chunks: Option<usize>,

        /// Use lexical word-overlap scoring instead of embeddings
        #[arg(long)]
        lexical: bool,
    },

    /// Ask a question and get an answer from the game world
    Ask {
        /// The question to ask
        question: String,

        /// Path to the raw transcript
        #[arg(short, long)]
        transcript: Option<String>,

        /// Path to the reference-page JSON
        #[arg(short, long)]
        references: Option<String>,

        /// Path to a prebuilt chunk partition map
        #[arg(long)]
        chunks: Option<String>,

        /// LLM model to use for response generation
        #[arg(short, long)]
        model: Option<String>,

        /// Maximum number of context items to include
        #[arg(short = 'k', long)]
        max_chunks: Option<usize>,

        /// Use lexical word-overlap scoring instead of embeddings
        #[arg(long)]
        lexical: bool,
    },

    /// Start an interactive question-answering session
    Chat {
        /// Path to the raw transcript
        #[arg(short, long)]
        transcript: Option<String>,

        /// Path to the reference-page JSON
        #[arg(short, long)]
        references: Option<String>,

        /// Path to a prebuilt chunk partition map
        #[arg(long)]
        chunks: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Use lexical word-overlap scoring instead of embeddings
        #[arg(long)]
        lexical: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write the current configuration to the default location
    Init,

    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
