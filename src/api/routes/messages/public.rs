//! Public types for sending messages by hand
use serde::{Deserialize, Serialize};

pub use crate::api::state::RecentMessage;

#[derive(Debug, Deserialize, Serialize)]
pub struct SendRequest {
    #[serde(rename = "chatId", default)]
    pub chat_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SendResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct RecentMessagesResponse {
    pub messages: Vec<RecentMessage>,
}
