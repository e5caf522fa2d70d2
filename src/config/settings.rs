//! Configuration settings for Skald.

use super::Prompts;
use crate::chunking::ChunkingConfig;
use crate::error::Result;
use crate::retrieval::RetrievalConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub corpus: CorpusSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
    pub generation: GenerationSettings,
    pub prompts: Prompts,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default corpus file locations, overridable per command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CorpusSettings {
    /// Path to the raw dialogue transcript.
    pub transcript_path: Option<String>,
    /// Path to the reference-page JSON (title -> {text, embedding}).
    pub references_path: Option<String>,
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Sentence units per chunk window.
    pub chunk_size: usize,
    /// Sentence units shared between adjacent windows.
    pub overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl ChunkingSettings {
    /// Convert to the chunker's configuration type.
    pub fn to_config(&self) -> ChunkingConfig {
        ChunkingConfig {
            chunk_size: self.chunk_size,
            overlap: self.overlap,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Whether semantic retrieval is enabled. When false, ranking falls
    /// back to lexical word-overlap scoring over the transcript.
    pub enabled: bool,
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Retrieval and context-assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Maximum number of context items to retrieve. When unset, semantic
    /// mode retrieves 5 and lexical mode 2.
    pub max_chunks: Option<usize>,
    /// Score boost per speaker mentioned in both query and chunk.
    pub character_bonus: f32,
    /// Multiplier applied to reference-page similarity scores.
    pub reference_weight: f32,
    /// Per-item character cap used during context assembly.
    pub max_context_length: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            max_chunks: None,
            character_bonus: 0.05,
            reference_weight: 0.7,
            max_context_length: 2000,
        }
    }
}

/// Text-generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// LLM model for response generation.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SkaldError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skald")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Check tunable parameters once at load time.
    pub fn validate(&self) -> Result<()> {
        self.chunking.to_config().validate()?;

        if self.retrieval.max_chunks == Some(0) {
            return Err(crate::error::SkaldError::Config(
                "retrieval.max_chunks must be greater than zero".to_string(),
            ));
        }
        if self.retrieval.max_context_length == 0 {
            return Err(crate::error::SkaldError::Config(
                "retrieval.max_context_length must be greater than zero".to_string(),
            ));
        }
        if !self.retrieval.character_bonus.is_finite() || self.retrieval.character_bonus < 0.0 {
            return Err(crate::error::SkaldError::Config(
                "retrieval.character_bonus must be a non-negative number".to_string(),
            ));
        }
        if !self.retrieval.reference_weight.is_finite() || self.retrieval.reference_weight < 0.0 {
            return Err(crate::error::SkaldError::Config(
                "retrieval.reference_weight must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of context items to retrieve, defaulting by scoring mode.
    pub fn top_k(&self) -> usize {
        match self.retrieval.max_chunks {
            Some(k) => k,
            None if self.embedding.enabled => 5,
            None => 2,
        }
    }

    /// Build the ranker configuration from these settings.
    pub fn retrieval_config(&self) -> RetrievalConfig {
        RetrievalConfig {
            top_k: self.top_k(),
            character_bonus: self.retrieval.character_bonus,
            reference_weight: self.retrieval.reference_weight,
        }
    }
}
