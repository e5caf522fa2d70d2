//! Interactive conversation sessions.
//!
//! A session owns an append-only conversation log for one interactive run.
//! Each turn retrieves context, renders the query prompt, and hands the
//! entire log to the generation service. The log only grows; there is no
//! compaction, so very long sessions accumulate history without bound.

use crate::config::Prompts;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::generation::{ConversationTurn, Generator};
use crate::retrieval::{assemble_context, ContextRanker};
use std::sync::Arc;
use tracing::debug;

/// Keywords that end an interactive session.
const EXIT_KEYWORDS: &[&str] = &["exit", "quit"];

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Ready to accept the next query.
    AwaitingInput,
    /// The user has ended the session.
    Terminated,
}

/// What a single turn produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Blank input; nothing happened.
    Idle,
    /// The session has ended.
    Terminated,
    /// A generated reply.
    Reply(String),
}

/// A single conversation over one corpus.
pub struct ConversationSession {
    corpus: Arc<Corpus>,
    ranker: ContextRanker,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    max_context_length: usize,
    log: Vec<ConversationTurn>,
    state: SessionState,
}

impl ConversationSession {
    /// Create a session over a read-only corpus.
    pub fn new(
        corpus: Arc<Corpus>,
        ranker: ContextRanker,
        generator: Arc<dyn Generator>,
        prompts: Prompts,
        max_context_length: usize,
    ) -> Self {
        Self {
            corpus,
            ranker,
            generator,
            prompts,
            max_context_length,
            log: Vec::new(),
            state: SessionState::AwaitingInput,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The conversation log so far.
    pub fn log(&self) -> &[ConversationTurn] {
        &self.log
    }

    /// Process one line of user input.
    ///
    /// Blank input is ignored; an exit keyword terminates the session;
    /// anything else runs retrieval and generation. A generation failure
    /// propagates to the caller and leaves the session awaiting input,
    /// with the user turn retained in the log.
    pub async fn handle_input(&mut self, input: &str) -> Result<TurnOutcome> {
        if self.state == SessionState::Terminated {
            return Ok(TurnOutcome::Terminated);
        }

        let input = input.trim();
        if input.is_empty() {
            return Ok(TurnOutcome::Idle);
        }

        if EXIT_KEYWORDS.iter().any(|k| input.eq_ignore_ascii_case(k)) {
            self.state = SessionState::Terminated;
            return Ok(TurnOutcome::Terminated);
        }

        let contexts = self
            .ranker
            .rank(
                input,
                &self.corpus.chunks,
                &self.corpus.references,
                &self.corpus.speakers,
            )
            .await?;
        let context_block = assemble_context(&contexts, self.max_context_length);

        debug!(
            "Turn {}: {} context items, {} characters of context",
            self.log.len() / 2 + 1,
            contexts.len(),
            context_block.chars().count()
        );

        let prompt = self.prompts.render_query(input, &context_block);
        self.log.push(ConversationTurn::user(prompt));

        let reply = self.generator.generate(&self.log).await?;
        self.log.push(ConversationTurn::assistant(reply.clone()));

        Ok(TurnOutcome::Reply(reply))
    }
}
