//! Router for the menu API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, routing::get};
use axum_extra::extract::Query;

use super::public;
use crate::api::state::AppState;
use crate::catalog;

type SharedState = Arc<RwLock<AppState>>;

async fn menu() -> Json<public::MenuResponse> {
    Json(public::MenuResponse {
        menu: catalog::render_full_menu(),
    })
}

async fn menu_search(Query(params): Query<public::MenuSearchQuery>) -> Json<public::MenuSearchResponse> {
    let results = catalog::search(&params.query);
    Json(public::MenuSearchResponse {
        query: params.query,
        results,
    })
}

/// Create the menu router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(menu))
        .route("/search", get(menu_search))
}
