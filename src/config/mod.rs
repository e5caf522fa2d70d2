//! Configuration module for Skald.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, QueryPrompts};
pub use settings::{
    ChunkingSettings, CorpusSettings, EmbeddingSettings, GeneralSettings, GenerationSettings,
    RetrievalSettings, Settings,
};
