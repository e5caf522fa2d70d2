//! Prompt templates for Skald.
//!
//! Templates use `{{placeholder}}` markers and can be overridden from the
//! configuration file.

use serde::{Deserialize, Serialize};

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub query: QueryPrompts,
}

/// Prompts for answering lore questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryPrompts {
    pub system: String,
    pub user: String,
}

impl Default for QueryPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a lore keeper who answers questions about a game world using excerpts from its dialogue transcript and encyclopedia pages.

Guidelines:
- Answer using only the provided context excerpts
- Mention speakers by name when the transcript supports it
- If the context does not contain the answer, say so clearly
- Be concise but thorough"#
                .to_string(),

            user: r#"Question: {{user_query}}

Relevant excerpts from the game world:

{{transcript_context}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Render the user query template with the question and context block.
    pub fn render_query(&self, user_query: &str, transcript_context: &str) -> String {
        self.query
            .user
            .replace("{{user_query}}", user_query)
            .replace("{{transcript_context}}", transcript_context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_query_substitutes_placeholders() {
        let prompts = Prompts::default();
        let rendered = prompts.render_query("who is Alice", "[TRANSCRIPT]\nAlice: Hi.");

        assert!(rendered.contains("who is Alice"));
        assert!(rendered.contains("[TRANSCRIPT]\nAlice: Hi."));
        assert!(!rendered.contains("{{user_query}}"));
        assert!(!rendered.contains("{{transcript_context}}"));
    }

    #[test]
    fn test_custom_template_is_used() {
        let prompts = Prompts {
            query: QueryPrompts {
                system: "custom system".to_string(),
                user: "Q={{user_query}} C={{transcript_context}}".to_string(),
            },
        };

        assert_eq!(prompts.render_query("a", "b"), "Q=a C=b");
    }
}
