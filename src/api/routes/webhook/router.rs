//! Router for the webhook API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use super::public;
use crate::api::public::{ApiError, error_response};
use crate::api::state::{AppState, read_state, write_state};

type SharedState = Arc<RwLock<AppState>>;

fn is_ignored(sender: &str, ignored_contacts: &[String]) -> bool {
    ignored_contacts
        .iter()
        .any(|contact| !contact.is_empty() && sender.contains(contact.as_str()))
}

/// Reply to a customer message forwarded by the bridge and send the
/// reply back through it when auto reply is on.
async fn receive_message(
    State(state): State<SharedState>,
    Json(payload): Json<public::InboundMessage>,
) -> Result<Response, ApiError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Ok(error_response(StatusCode::BAD_REQUEST, "Empty message"));
    }

    let (assistant, bridge, auto_reply) = {
        let shared_state = read_state(&state)?;
        if is_ignored(&payload.sender, &shared_state.config.ignored_contacts) {
            tracing::info!("Ignoring message from {}", payload.sender);
            return Ok(Json(public::IgnoredResponse {
                status: String::from("ignored"),
            })
            .into_response());
        }
        (
            Arc::clone(&shared_state.assistant),
            shared_state.bridge.clone(),
            shared_state.config.auto_reply,
        )
    };

    let sender_name = payload
        .sender_name
        .clone()
        .unwrap_or_else(|| payload.sender.clone());
    tracing::info!(
        "Message from {} ({}): {}",
        sender_name,
        payload.chat_id,
        message.chars().take(100).collect::<String>()
    );
    {
        let mut shared_state = write_state(&state)?;
        shared_state.stats.messages_received += 1;
        shared_state.recent_messages.incoming(
            assistant.now(),
            &sender_name,
            &payload.chat_id,
            message,
        );
    }

    let reply = assistant
        .handle_inbound_message(&payload.chat_id, message, &payload.sender, &sender_name)
        .await;

    if auto_reply {
        let sent = bridge.send_text(&payload.chat_id, &reply).await;
        let mut shared_state = write_state(&state)?;
        match sent {
            Ok(()) => {
                shared_state.stats.messages_sent += 1;
                shared_state
                    .recent_messages
                    .outgoing(assistant.now(), &payload.chat_id, &reply);
            }
            Err(e) => {
                tracing::error!("Failed to send reply to {}: {}", payload.chat_id, e);
                shared_state.stats.errors += 1;
            }
        }
    }

    Ok(Json(public::ReplyResponse {
        status: String::from("ok"),
        response: reply,
        auto_sent: auto_reply,
    })
    .into_response())
}

/// Create the webhook router
pub fn router() -> Router<SharedState> {
    Router::new().route("/message", post(receive_message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_matches_ignored_contacts_by_substring() {
        let ignored = vec![String::new(), String::from("5219220000000")];
        assert!(is_ignored("5219220000000@c.us", &ignored));
        assert!(!is_ignored("5219221111111@c.us", &ignored));
        assert!(!is_ignored("anything", &[String::new()]));
    }
}
