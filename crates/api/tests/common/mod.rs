#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cinema_api::config::{LogFormat, ServerConfig};
use cinema_api::router::build_app_router;
use cinema_api::state::AppState;
use cinema_db::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The store handle is returned too so tests can inspect state the API never
/// exposes (password hashes, confirmation codes). The router is cheap to
/// clone; every clone shares the same store.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
    };
    (build_app_router(state, &config), store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body.to_string()).await
}

/// Send a raw body with a JSON content type, for malformed-payload tests.
pub async fn send_json(app: Router, method: Method, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a director through the API and return its id.
pub async fn create_director(app: &Router, name: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/directors/",
        serde_json::json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), 201, "director fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a movie through the API and return its id.
pub async fn create_movie(app: &Router, director: i64, title: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/movies/",
        serde_json::json!({
            "title": title,
            "description": format!("About {title}"),
            "duration": 120,
            "director": director,
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "movie fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a review through the API and return its id.
pub async fn create_review(app: &Router, movie: i64, stars: i64) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/reviews/",
        serde_json::json!({"text": format!("{stars} stars"), "stars": stars, "movie": movie}),
    )
    .await;
    assert_eq!(response.status(), 201, "review fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}
