pub mod handlers;
pub mod router;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

pub type ApiError = (StatusCode, Json<Value>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// 500 响应体统一带上完整的错误链
pub fn internal_error(err: &anyhow::Error) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
}
