use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ai::chat::{Turn, TurnRole};
use crate::ai::llm::{CompletionOptions, LanguageModel, LlmError};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Message {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: Some(content.to_string()),
        }
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            TurnRole::User => Role::User,
            TurnRole::Assistant => Role::Assistant,
        };
        Message::new(role, &turn.text)
    }
}

// Gemini's OpenAI compatible endpoint reports quota errors with this
// status string, sometimes without a 429.
const RESOURCE_EXHAUSTED: &str = "RESOURCE_EXHAUSTED";

pub async fn completion(
    messages: &Vec<Message>,
    options: &CompletionOptions,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, LlmError> {
    let payload = json!({
        "model": model,
        "messages": messages,
        "temperature": options.temperature,
        "max_tokens": options.max_tokens,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 2))
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS || body.contains(RESOURCE_EXHAUSTED) {
            return Err(LlmError::RateLimited);
        }
        return Err(LlmError::Api(format!("{}: {}", status, body)));
    }

    Ok(response.json().await?)
}

/// Language model backed by an OpenAI compatible chat completions API.
pub struct OpenAiClient {
    api_hostname: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(
        &self,
        turns: &[Turn],
        system_instruction: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(Message::new(Role::System, system_instruction));
        messages.extend(turns.iter().map(Message::from));

        let resp = completion(
            &messages,
            options,
            &self.api_hostname,
            &self.api_key,
            &self.model,
        )
        .await?;

        match resp["choices"][0]["message"]["content"].as_str() {
            Some(content) => Ok(content.trim().to_string()),
            None => Err(LlmError::Api(format!("No message received. Resp:\n\n {}", resp))),
        }
    }
}
