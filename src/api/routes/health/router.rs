//! Router for the health check polled by the bridge

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::get};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::{AppState, read_state};

type SharedState = Arc<RwLock<AppState>>;

async fn health(
    State(state): State<SharedState>,
) -> Result<Json<public::HealthResponse>, ApiError> {
    let shared_state = read_state(&state)?;
    Ok(Json(public::HealthResponse {
        status: String::from("ok"),
        restaurant: shared_state.config.restaurant.name.clone(),
        timestamp: shared_state.assistant.now(),
    }))
}

/// Create the health router
pub fn router() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}
