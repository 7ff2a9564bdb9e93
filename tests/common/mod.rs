#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;
use tinyurl::domain::repositories::UrlRepository;
use tinyurl::infrastructure::persistence::InMemoryUrlRepository;
use tinyurl::routes::build_router;
use tinyurl::state::AppState;

pub const BASE_URL: &str = "https://sho.rt";

pub fn create_test_state() -> AppState {
    create_test_state_with(Arc::new(InMemoryUrlRepository::new()))
}

pub fn create_test_state_with(repository: Arc<dyn UrlRepository>) -> AppState {
    AppState::new(repository, BASE_URL.to_string(), "test".to_string())
}

/// Full router without rate limiting, so no connect info is required.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, false)).unwrap()
}

/// Creates a short URL through the API and returns the response body.
pub async fn create_url(server: &TestServer, target_url: &str) -> Value {
    let response = server
        .post("/api/v1/url")
        .json(&serde_json::json!({ "target_url": target_url }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

pub async fn create_custom_url(server: &TestServer, target_url: &str, custom_key: &str) -> Value {
    let response = server
        .post("/api/v1/custom_url")
        .json(&serde_json::json!({ "target_url": target_url, "custom_key": custom_key }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}
