//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod health;
pub mod redirect;
pub mod root;
pub mod shorten;

pub use admin::{admin_info_handler, delete_url_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use root::{api_info_handler, welcome_handler};
pub use shorten::{create_custom_url_handler, create_url_handler};

use crate::error::AppError;
use axum::http::Uri;
use serde_json::json;

/// Uniform 404 for lookups that found nothing or only a deactivated entity.
pub(crate) fn url_not_found(uri: &Uri) -> AppError {
    AppError::not_found(
        format!("URL '{}' doesn't exist.", uri),
        json!({ "path": uri.path() }),
    )
}
