//! DTOs for short URL creation and administration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlEntity;
use crate::state::AppState;
use crate::utils::url_validator::MAX_URL_LENGTH;

/// Placeholder shown instead of the secret key outside the creation response.
pub const REDACTED_SECRET_KEY: &str = "********";

/// Request to shorten a URL under a random key.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The destination URL. Scheme and host rules are enforced by the service.
    #[validate(length(min = 1, max = 2048))]
    pub target_url: String,
}

/// Request to shorten a URL under a caller-chosen key.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomUrlRequest {
    #[validate(length(min = 1, max = 2048))]
    pub target_url: String,

    /// Custom key (3-20 characters: letters, digits, hyphens, underscores).
    #[validate(length(min = 3, max = 20))]
    pub custom_key: String,
}

/// Short URL details returned to clients.
///
/// `secret_key` is real only in creation responses. Admin reads carry
/// [`REDACTED_SECRET_KEY`] and no `admin_url`.
#[derive(Debug, Serialize)]
pub struct UrlInfoResponse {
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub key: String,
    pub secret_key: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UrlInfoResponse {
    /// Full view including the secret key. Only for creation responses.
    pub fn created(state: &AppState, url: UrlEntity) -> Self {
        Self {
            url: state.short_url(&url.key),
            admin_url: Some(state.admin_url(&url.secret_key)),
            target_url: url.target_url,
            is_active: url.is_active,
            clicks: url.clicks,
            key: url.key,
            secret_key: url.secret_key,
            created_at: url.created_at,
        }
    }

    /// View with the secret key replaced by a placeholder.
    pub fn redacted(state: &AppState, url: UrlEntity) -> Self {
        Self {
            url: state.short_url(&url.key),
            admin_url: None,
            target_url: url.target_url,
            is_active: url.is_active,
            clicks: url.clicks,
            key: url.key,
            secret_key: REDACTED_SECRET_KEY.to_string(),
            created_at: url.created_at,
        }
    }
}

/// Response to a successful deactivation.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub detail: String,
}

/// Static API description served at the API root.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub max_url_length: usize,
}

impl Default for ApiInfoResponse {
    fn default() -> Self {
        Self {
            message: "Welcome to the URL shortener API :)",
            version: "1.0",
            status: "active",
            max_url_length: MAX_URL_LENGTH,
        }
    }
}
