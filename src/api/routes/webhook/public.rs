//! Public types for the webhook API
use serde::{Deserialize, Serialize};

fn unknown_sender() -> String {
    String::from("desconocido")
}

/// Message forwarded by the WhatsApp bridge.
#[derive(Debug, Deserialize, Serialize)]
pub struct InboundMessage {
    #[serde(rename = "chatId", default)]
    pub chat_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "unknown_sender")]
    pub sender: String,
    #[serde(rename = "senderName")]
    pub sender_name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReplyResponse {
    pub status: String,
    pub response: String,
    pub auto_sent: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IgnoredResponse {
    pub status: String,
}
