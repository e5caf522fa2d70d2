//! OpenAI chat-completion generator.

use super::{ConversationTurn, Generator, Role};
use crate::error::{Result, SkaldError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI-backed generator.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    system_prompt: String,
}

impl OpenAIGenerator {
    /// Create a generator with the given model, temperature, and system prompt.
    pub fn new(model: &str, temperature: f32, system_prompt: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
            system_prompt: system_prompt.to_string(),
        }
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, turns), fields(turns = turns.len()))]
    async fn generate(&self, turns: &[ConversationTurn]) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(turns.len() + 1);

        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| SkaldError::Generation(e.to_string()))?
                .into(),
        );

        for turn in turns {
            let message: ChatCompletionRequestMessage = match turn.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.content.clone())
                    .build()
                    .map_err(|e| SkaldError::Generation(e.to_string()))?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.content.clone())
                    .build()
                    .map_err(|e| SkaldError::Generation(e.to_string()))?
                    .into(),
            };
            messages.push(message);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| SkaldError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SkaldError::Generation(format!("Chat API error: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| SkaldError::Generation("Empty response from model".to_string()))?
            .clone();

        debug!("Generated {} characters", answer.chars().count());
        Ok(answer)
    }
}
