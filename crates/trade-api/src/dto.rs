//! Data Transfer Objects for API requests and responses

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tradeboard_core::ApiResponse;

use crate::StoreError;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub trades: usize,
}

impl HealthResponse {
    pub fn new(trades: usize) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            trades,
        }
    }
}

/// Error half of every handler result
pub type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

impl From<StoreError> for ErrorResponse {
    fn from(err: StoreError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::debug!(code = err.error_code(), "Trade request refused: {}", err);
        (status, Json(ApiResponse::err(err.to_string())))
    }
}
