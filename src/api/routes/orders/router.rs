//! Router for the orders API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::Query;

use super::public;
use crate::ai::chat::Assistant;
use crate::api::public::{ApiError, error_response};
use crate::api::state::{AppState, read_state};
use crate::orders::OrderStatus;

type SharedState = Arc<RwLock<AppState>>;

fn assistant(state: &SharedState) -> Result<Arc<Assistant>, ApiError> {
    Ok(Arc::clone(&read_state(state)?.assistant))
}

/// All confirmed orders
async fn list_orders(
    State(state): State<SharedState>,
) -> Result<Json<public::OrdersResponse>, ApiError> {
    Ok(Json(public::OrdersResponse {
        orders: assistant(&state)?.list_confirmed_orders(),
    }))
}

/// Orders confirmed after `since`, for polling dashboards
async fn list_new_orders(
    State(state): State<SharedState>,
    Query(params): Query<public::NewOrdersQuery>,
) -> Result<Json<public::NewOrdersResponse>, ApiError> {
    let orders = assistant(&state)?.list_new_orders_since(params.since.unwrap_or(0));
    Ok(Json(public::NewOrdersResponse {
        count: orders.len(),
        orders,
    }))
}

async fn update_status(
    State(state): State<SharedState>,
    Path(order_id): Path<u64>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload: public::StatusUpdateRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some(requested) = payload.status.filter(|s| !s.trim().is_empty()) else {
        return Ok(error_response(StatusCode::BAD_REQUEST, "status es requerido"));
    };
    let status = match requested.parse::<OrderStatus>() {
        Ok(status) => status,
        Err(e) => return Ok(error_response(StatusCode::BAD_REQUEST, &e.to_string())),
    };

    let assistant = assistant(&state)?;
    if !assistant.update_order_status(order_id, status).await {
        return Ok(error_response(StatusCode::NOT_FOUND, "Pedido no encontrado"));
    }

    Ok(Json(public::StatusUpdateResponse {
        status: String::from("ok"),
        order_id,
        new_status: status.to_string(),
    })
    .into_response())
}

/// Create the orders router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/new", get(list_new_orders))
        .route("/{id}/status", post(update_status))
}
