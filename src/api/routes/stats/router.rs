//! Router for message counters

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::get};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::{AppState, read_state};

type SharedState = Arc<RwLock<AppState>>;

async fn stats(State(state): State<SharedState>) -> Result<Json<public::Stats>, ApiError> {
    Ok(Json(read_state(&state)?.stats.clone()))
}

/// Create the stats router
pub fn router() -> Router<SharedState> {
    Router::new().route("/stats", get(stats))
}
