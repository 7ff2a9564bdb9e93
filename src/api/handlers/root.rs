//! Informational root endpoints.

use axum::Json;
use serde_json::{Value, json};

use crate::api::dto::url::ApiInfoResponse;

/// `GET /`
pub async fn welcome_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the TinyURL API" }))
}

/// `GET /api/v1/`
pub async fn api_info_handler() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse::default())
}
