//! Shared state injected into every HTTP handler.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// Service type used by the HTTP layer, erased over the storage backend.
pub type DynUrlService = UrlService<dyn UrlRepository>;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<DynUrlService>,
    /// Public base URL without trailing slash.
    pub base_url: String,
    pub env_name: String,
}

impl AppState {
    pub fn new(url_repository: Arc<dyn UrlRepository>, base_url: String, env_name: String) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(url_repository)),
            base_url: base_url.trim_end_matches('/').to_string(),
            env_name,
        }
    }

    /// Public redirect URL for `key`.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Administration URL for `secret_key`.
    pub fn admin_url(&self, secret_key: &str) -> String {
        format!("{}/admin/{}", self.base_url, secret_key)
    }
}
