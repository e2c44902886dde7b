//! Public types for the health check
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub restaurant: String,
    pub timestamp: NaiveDateTime,
}
