//! Handlers for the secret-key administration channel.

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
};

use super::url_not_found;
use crate::api::dto::url::{DeleteResponse, UrlInfoResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns details and click count of an active short URL.
///
/// # Endpoint
///
/// `GET /admin/{secret_key}`
///
/// The secret key is redacted in the response.
///
/// # Errors
///
/// Returns 404 Not Found if the secret key is unknown or the URL was deactivated.
pub async fn admin_info_handler(
    Path(secret_key): Path<String>,
    OriginalUri(uri): OriginalUri,
    State(state): State<AppState>,
) -> Result<Json<UrlInfoResponse>, AppError> {
    let url = state
        .url_service
        .get_url_by_secret_key(&secret_key)
        .await?
        .ok_or_else(|| url_not_found(&uri))?;

    Ok(Json(UrlInfoResponse::redacted(&state, url)))
}

/// Deactivates a short URL.
///
/// # Endpoint
///
/// `DELETE /admin/{secret_key}`
///
/// Repeating the request for an already deactivated URL succeeds again.
///
/// # Errors
///
/// Returns 404 Not Found if the secret key never existed.
pub async fn delete_url_handler(
    Path(secret_key): Path<String>,
    OriginalUri(uri): OriginalUri,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let url = state
        .url_service
        .delete_url_by_secret_key(&secret_key)
        .await?
        .ok_or_else(|| url_not_found(&uri))?;

    Ok(Json(DeleteResponse {
        detail: format!("Successfully deleted short URL for '{}'", url.target_url),
    }))
}
