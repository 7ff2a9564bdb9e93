//! API route configuration.
//!
//! Everything here is mounted under `/api/v1`.

use crate::api::handlers::{
    admin_info_handler, api_info_handler, create_custom_url_handler, create_url_handler,
    delete_url_handler, redirect_handler,
};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Version 1 of the REST API.
///
/// # Endpoints
///
/// - `GET    /`                    - API information
/// - `POST   /url`                 - Create a short URL with a random key
/// - `POST   /custom_url`          - Create a short URL with a chosen key
/// - `GET    /{url_key}`           - Redirect to the target URL
/// - `GET    /admin/{secret_key}`  - Inspect a short URL
/// - `DELETE /admin/{secret_key}`  - Deactivate a short URL
///
/// When `rate_limit` is set, the two creation endpoints are limited per
/// client IP.
pub fn v1_routes(rate_limit: bool) -> Router<AppState> {
    let mut create_routes = Router::new()
        .route("/url", post(create_url_handler))
        .route("/custom_url", post(create_custom_url_handler));

    if rate_limit {
        create_routes = create_routes.layer(rate_limit::layer());
    }

    Router::new()
        .route("/", get(api_info_handler))
        .route("/{url_key}", get(redirect_handler))
        .route(
            "/admin/{secret_key}",
            get(admin_info_handler).delete(delete_url_handler),
        )
        .merge(create_routes)
}
