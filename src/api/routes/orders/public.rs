//! Public types for the orders API
use serde::{Deserialize, Serialize};

use crate::orders::ConfirmedOrder;

#[derive(Debug, Deserialize, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<ConfirmedOrder>,
}

#[derive(Debug, Deserialize)]
pub struct NewOrdersQuery {
    pub since: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NewOrdersResponse {
    pub orders: Vec<ConfirmedOrder>,
    pub count: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StatusUpdateResponse {
    pub status: String,
    pub order_id: u64,
    pub new_status: String,
}
