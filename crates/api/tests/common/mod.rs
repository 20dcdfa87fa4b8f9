#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use estimator_core::estimation::MissingMappingPolicy;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use estimator_api::config::ServerConfig;
use estimator_api::router::build_app_router;
use estimator_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(policy: MissingMappingPolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        missing_mapping_policy: policy,
    }
}

/// Build the full application router with the default zero-hours policy.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_policy(pool, MissingMappingPolicy::ZeroDefault)
}

/// Build the full application router, exercising the same middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app_with_policy(pool: PgPool, policy: MissingMappingPolicy) -> Router {
    let config = test_config(policy);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Look up a seeded master-data row's ID by name via the API.
pub async fn id_by_name(pool: &PgPool, collection: &str, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/{collection}")).await).await;
    json.as_array()
        .unwrap()
        .iter()
        .find(|row| row["name"] == name)
        .unwrap_or_else(|| panic!("{collection} has no row named {name}"))["id"]
        .as_i64()
        .unwrap()
}
