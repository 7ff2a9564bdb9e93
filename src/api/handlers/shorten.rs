//! Handlers for short URL creation.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::url::{CreateCustomUrlRequest, CreateUrlRequest, UrlInfoResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL under a random key.
///
/// # Endpoint
///
/// `POST /api/v1/url`
///
/// # Request Body
///
/// ```json
/// { "target_url": "https://example.com" }
/// ```
///
/// # Response
///
/// The created URL, including the full `secret_key` and `admin_url`. This is
/// the only response that ever contains the secret.
///
/// # Errors
///
/// - 400 if the target URL is invalid
/// - 503 if no free key could be found
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<Json<UrlInfoResponse>, AppError> {
    payload.validate()?;

    let url = state
        .url_service
        .create_short_url(&payload.target_url)
        .await?;

    Ok(Json(UrlInfoResponse::created(&state, url)))
}

/// Creates a short URL under a caller-chosen key.
///
/// # Endpoint
///
/// `POST /api/v1/custom_url`
///
/// # Request Body
///
/// ```json
/// { "target_url": "https://example.com", "custom_key": "my-link" }
/// ```
///
/// # Errors
///
/// - 400 if the target URL or key format is invalid
/// - 409 if the key is already taken, including by a deactivated URL
pub async fn create_custom_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomUrlRequest>,
) -> Result<Json<UrlInfoResponse>, AppError> {
    payload.validate()?;

    let url = state
        .url_service
        .create_custom_short_url(&payload.target_url, &payload.custom_key)
        .await?;

    Ok(Json(UrlInfoResponse::created(&state, url)))
}
