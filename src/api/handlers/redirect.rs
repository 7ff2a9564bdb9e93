//! Handler for short URL redirect.

use axum::{
    extract::{OriginalUri, Path, State},
    response::Redirect,
};

use super::url_not_found;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its target URL and counts the click.
///
/// # Endpoint
///
/// `GET /{key}` and `GET /api/v1/{key}`
///
/// # Request Flow
///
/// 1. Look up the active URL for `key`
/// 2. Increment its click counter
/// 3. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist or was deactivated.
pub async fn redirect_handler(
    Path(key): Path<String>,
    OriginalUri(uri): OriginalUri,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state
        .url_service
        .get_url_by_key(&key)
        .await?
        .ok_or_else(|| url_not_found(&uri))?;

    let url = state.url_service.increment_click_count(url).await?;

    Ok(Redirect::temporary(&url.target_url))
}
