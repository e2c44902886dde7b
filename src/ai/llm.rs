//! The seam between the dialogue core and whichever hosted model
//! produces replies.

use async_trait::async_trait;
use thiserror::Error;

use crate::ai::chat::Turn;

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Language model rate limit exceeded")]
    RateLimited,

    #[error("Language model error: {0}")]
    Api(String),

    #[error("Language model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to build system instruction: {0}")]
    Instruction(String),
}

impl LlmError {
    /// Only rate limits are worth waiting out, everything else fails
    /// over to the keyword responder right away.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited)
    }
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(
        &self,
        turns: &[Turn],
        system_instruction: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError>;
}
