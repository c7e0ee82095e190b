//! Common test utilities

#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mergington::registry::ActivityRegistry;
use mergington::server::{ActivityServer, AppState, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

/// Response captured from a oneshot request
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Router over a freshly seeded registry, plus its state for direct inspection
pub fn test_app() -> (Router, AppState) {
    let config = ServerConfig::builder()
        .static_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
        .enable_request_logging(false)
        .build()
        .unwrap();

    let server = ActivityServer::new(config, ActivityRegistry::with_default_activities()).unwrap();
    (server.build_router(), server.state())
}

/// `/activities/{name}/{action}?email={email}` with both parts encoded
pub fn activity_uri(activity: &str, action: &str, email: &str) -> String {
    format!(
        "/activities/{}/{}?email={}",
        urlencoding::encode(activity),
        action,
        urlencoding::encode(email)
    )
}

pub async fn send(app: &Router, method: Method, uri: &str) -> TestResponse {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri).await
}

pub async fn signup(app: &Router, activity: &str, email: &str) -> TestResponse {
    send(app, Method::POST, &activity_uri(activity, "signup", email)).await
}

pub async fn unregister(app: &Router, activity: &str, email: &str) -> TestResponse {
    send(app, Method::DELETE, &activity_uri(activity, "unregister", email)).await
}

/// Current roster of an activity as seen through GET /activities
pub async fn participants(app: &Router, activity: &str) -> Vec<String> {
    let activities = get(app, "/activities").await.json();
    serde_json::from_value(activities[activity]["participants"].clone()).unwrap()
}
