use std::time::Duration;

use anyhow::{Result, anyhow};
use serde_json::json;

/// Client for the WhatsApp bridge process which delivers messages to
/// customers.
#[derive(Clone, Debug)]
pub struct BridgeClient {
    base_url: String,
    client: reqwest::Client,
}

impl BridgeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn send_text(&self, chat_id: &str, message: &str) -> Result<()> {
        let url = format!("{}/send", self.base_url);
        let response = self
            .client
            .post(url)
            .timeout(Duration::from_secs(10))
            .json(&json!({
                "chatId": chat_id,
                "message": message,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Bridge rejected message: {} {}", status, body));
        }
        tracing::debug!("Sent message to {}", chat_id);
        Ok(())
    }
}
