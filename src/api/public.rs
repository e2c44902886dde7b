//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

// Errors

pub struct ApiError(anyhow::Error);

/// Convert `AppError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, AppError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Body of every 4xx and 5xx response.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// Re-export public types from each route

pub mod history {
    pub use crate::api::routes::history::public::*;
}

pub mod menu {
    pub use crate::api::routes::menu::public::*;
}

pub mod messages {
    pub use crate::api::routes::messages::public::*;
}

pub mod orders {
    pub use crate::api::routes::orders::public::*;
}

pub mod stats {
    pub use crate::api::routes::stats::public::*;
}

pub mod webhook {
    pub use crate::api::routes::webhook::public::*;
}
