//! Router for sending messages by hand and reviewing recent traffic

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use super::public;
use crate::api::public::{ApiError, error_response};
use crate::api::state::{AppState, read_state, write_state};

type SharedState = Arc<RwLock<AppState>>;

async fn send_message(
    State(state): State<SharedState>,
    Json(payload): Json<public::SendRequest>,
) -> Result<Response, ApiError> {
    if payload.chat_id.is_empty() || payload.message.is_empty() {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "chatId y message son requeridos",
        ));
    }

    let bridge = read_state(&state)?.bridge.clone();
    let sent = bridge.send_text(&payload.chat_id, &payload.message).await;

    let mut shared_state = write_state(&state)?;
    let status = match sent {
        Ok(()) => {
            shared_state.stats.messages_sent += 1;
            "sent"
        }
        Err(e) => {
            tracing::error!("Failed to send message to {}: {}", payload.chat_id, e);
            shared_state.stats.errors += 1;
            "error"
        }
    };

    Ok(Json(public::SendResponse {
        status: status.to_string(),
    })
    .into_response())
}

/// Latest messages received from and sent to customers, oldest first.
async fn recent_messages(
    State(state): State<SharedState>,
) -> Result<Json<public::RecentMessagesResponse>, ApiError> {
    Ok(Json(public::RecentMessagesResponse {
        messages: read_state(&state)?.recent_messages.to_vec(),
    }))
}

/// Create the messages router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/send", post(send_message))
        .route("/messages/recent", get(recent_messages))
}
