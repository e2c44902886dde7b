//! API routes module

pub mod health;
pub mod history;
pub mod menu;
pub mod messages;
pub mod orders;
pub mod stats;
pub mod webhook;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined router. The bridge calls `/health` and
/// `/webhook/message` at the root, everything else lives under `/api`.
pub fn router() -> Router<SharedState> {
    Router::new()
        // Health check
        .merge(health::router())
        // Messages forwarded by the bridge
        .nest("/webhook", webhook::router())
        .nest("/api", api_router())
}

fn api_router() -> Router<SharedState> {
    Router::new()
        // Message counters
        .merge(stats::router())
        // Manual sends and recent traffic
        .merge(messages::router())
        // Conversation history
        .merge(history::router())
        // Menu
        .nest("/menu", menu::router())
        // Confirmed orders
        .nest("/orders", orders::router())
}
