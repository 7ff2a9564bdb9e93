//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /`                    - Welcome message
//! - `GET    /health`              - Health check
//! - `GET    /{key}`               - Short URL redirect
//! - `GET    /admin/{secret_key}`  - Inspect a short URL
//! - `DELETE /admin/{secret_key}`  - Deactivate a short URL
//! - `/api/v1/*`                   - Versioned REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on creation endpoints
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    admin_info_handler, delete_url_handler, health_handler, redirect_handler, welcome_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - enables per-IP rate limiting on creation endpoints; the
///   server must then be served with `into_make_service_with_connect_info`
pub fn app_router(state: AppState, rate_limit: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, rate_limit))
}

/// All routes with tracing, before path normalization.
pub fn build_router(state: AppState, rate_limit: bool) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .route(
            "/admin/{secret_key}",
            get(admin_info_handler).delete(delete_url_handler),
        )
        .route("/{key}", get(redirect_handler))
        .nest("/api/v1", api::routes::v1_routes(rate_limit))
        .with_state(state)
        .layer(tracing::layer())
}
