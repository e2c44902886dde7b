//! Public types for the menu API
use serde::{Deserialize, Serialize};

use crate::catalog::SearchHit;

#[derive(Debug, Deserialize, Serialize)]
pub struct MenuResponse {
    pub menu: String,
}

#[derive(Debug, Deserialize)]
pub struct MenuSearchQuery {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct MenuSearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}
