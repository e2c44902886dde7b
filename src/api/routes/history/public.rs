//! Public types for clearing conversation history
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ClearHistoryRequest {
    #[serde(rename = "chatId")]
    pub chat_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ClearHistoryResponse {
    pub status: String,
    pub cleared: usize,
}
