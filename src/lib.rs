//! Skald - Game-world question answering
//!
//! A CLI tool and library for answering natural-language questions about a
//! fictional game world from two corpora: a segmented dialogue transcript
//! and a set of encyclopedia-style lore pages.
//!
//! The name "Skald" comes from the Norse court poets who kept their
//! world's stories.
//!
//! # Overview
//!
//! Skald allows you to:
//! - Chunk a dialogue transcript into overlapping, sentence-aligned segments
//! - Extract the set of speakers appearing in the dialogue
//! - Rank transcript chunks and lore pages against a query, lexically or
//!   via an embedding service
//! - Assemble ranked results into a bounded context block for a prompt
//! - Hold an interactive conversation grounded in the retrieved context
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `chunking` - Transcript segmentation and speaker extraction
//! - `corpus` - Keyed chunk partitions and reference pages
//! - `embedding` - Embedding generation and vector similarity
//! - `retrieval` - Relevance ranking and context assembly
//! - `generation` - Text generation behind a capability interface
//! - `session` - Interactive conversation sessions
//!
//! # Example
//!
//! ```rust,no_run
//! use skald::chunking::{ChunkingConfig, SentenceWindowChunker};
//! use skald::corpus::Corpus;
//! use skald::retrieval::{assemble_context, ContextRanker, RetrievalConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let chunker = SentenceWindowChunker::new(ChunkingConfig::default())?;
//!     let corpus = Corpus::build("Alice: Hi there. Bob: Hello friend.", &chunker)?;
//!
//!     let ranker = ContextRanker::lexical(RetrievalConfig::default());
//!     let contexts = ranker
//!         .rank("hello", &corpus.chunks, &corpus.references, &corpus.speakers)
//!         .await?;
//!
//!     let block = assemble_context(&contexts, 2000);
//!     println!("{}", block);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod openai;
pub mod retrieval;
pub mod session;

pub use error::{Result, SkaldError};
