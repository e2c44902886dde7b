//! Router for clearing conversation history

use std::sync::{Arc, RwLock};

use axum::{Json, Router, body::Bytes, extract::State, routing::post};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::{AppState, read_state};

type SharedState = Arc<RwLock<AppState>>;

/// Clear one conversation when `chatId` is given, otherwise all of
/// them. A missing or malformed body clears everything.
async fn clear_history(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<public::ClearHistoryResponse>, ApiError> {
    let payload: public::ClearHistoryRequest = serde_json::from_slice(&body).unwrap_or_default();
    let assistant = Arc::clone(&read_state(&state)?.assistant);

    let response = match payload.chat_id.filter(|id| !id.is_empty()) {
        Some(chat_id) => {
            let cleared = assistant.clear_conversation(&chat_id);
            public::ClearHistoryResponse {
                status: format!("Historial de {} limpiado", chat_id),
                cleared: usize::from(cleared),
            }
        }
        None => public::ClearHistoryResponse {
            status: String::from("Todos los historiales limpiados"),
            cleared: assistant.clear_all_conversations(),
        },
    };
    Ok(Json(response))
}

/// Create the history router
pub fn router() -> Router<SharedState> {
    Router::new().route("/clear-history", post(clear_history))
}
