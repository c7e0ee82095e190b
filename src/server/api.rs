//! REST API handlers for the activity server
//!
//! Routes:
//!
//! - `GET    /`                                   - redirect to the static front-end
//! - `GET    /activities`                         - every activity with its roster
//! - `GET    /activities/{activity_name}`         - one activity
//! - `POST   /activities/{activity_name}/signup`  - enroll `?email=`
//! - `DELETE /activities/{activity_name}/unregister` - withdraw `?email=`
//! - `GET    /health`                             - liveness and uptime
//! - `GET    /metrics`                            - Prometheus exposition

use std::time::Instant;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        MatchedPath, Path, Query, Request, State,
    },
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::models::{Activity, ActivityCatalog};
use crate::registry::RegistryError;

use super::server::AppState;

/// Location of the front-end entry page
pub const INDEX_PATH: &str = "/static/index.html";

// ============================================================================
// API Response Types
// ============================================================================

/// Success body for signup and unregister
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub activities: usize,
}

/// Query string for signup and unregister
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Raw query pairs, so a repeated `email` resolves to its last value
type QueryPairs = Query<Vec<(String, String)>>;

impl From<Vec<(String, String)>> for EmailQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let email = pairs
            .into_iter()
            .filter(|(key, _)| key == "email")
            .map(|(_, value)| value)
            .last();
        Self { email }
    }
}

impl EmailQuery {
    fn require_email(self) -> Result<String, ApiError> {
        self.email.ok_or_else(|| {
            ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Missing required query parameter: email",
            )
        })
    }
}

// ============================================================================
// API Errors
// ============================================================================

/// Error returned from a handler, rendered as `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// HTTP status for a registry error
pub fn status_for(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::ActivityNotFound { .. } => StatusCode::NOT_FOUND,
        RegistryError::AlreadyEnrolled { .. } | RegistryError::NotEnrolled { .. } => {
            StatusCode::BAD_REQUEST
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        Self::new(status_for(&err), err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/activities", get(list_activities))
        .route("/activities/{activity_name}", get(get_activity))
        .route("/activities/{activity_name}/signup", post(signup))
        .route("/activities/{activity_name}/unregister", delete(unregister))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Record request count and latency per matched route
async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    metrics::record_api_request(
        &endpoint,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

// ============================================================================
// Activity Handlers
// ============================================================================

async fn root_redirect() -> Redirect {
    Redirect::temporary(INDEX_PATH)
}

/// List every activity with its roster
async fn list_activities(State(state): State<AppState>) -> Json<ActivityCatalog> {
    Json(state.registry.list_activities().await)
}

/// Get a single activity
async fn get_activity(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Activity>, ApiError> {
    let Path(activity_name) = path?;
    state
        .registry
        .get_activity(&activity_name)
        .await
        .map(Json)
        .ok_or_else(|| {
            RegistryError::ActivityNotFound {
                activity: activity_name,
            }
            .into()
        })
}

/// Sign a student up for an activity
async fn signup(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<QueryPairs, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let Query(pairs) = query?;
    let email = EmailQuery::from(pairs).require_email()?;

    match state.registry.enroll(&activity_name, &email).await {
        Ok(enrollment) => {
            metrics::record_enrollment(&enrollment.activity);
            tracing::info!(activity = %enrollment.activity, email = %enrollment.email, "Signed up");
            Ok(Json(MessageResponse::new(format!(
                "Signed up {} for {}",
                enrollment.email, enrollment.activity
            ))))
        }
        Err(e) => Err(reject("signup", e)),
    }
}

/// Remove a student from an activity
async fn unregister(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<QueryPairs, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = path?;
    let Query(pairs) = query?;
    let email = EmailQuery::from(pairs).require_email()?;

    match state.registry.withdraw(&activity_name, &email).await {
        Ok(enrollment) => {
            metrics::record_withdrawal(&enrollment.activity);
            tracing::info!(activity = %enrollment.activity, email = %enrollment.email, "Unregistered");
            Ok(Json(MessageResponse::new(format!(
                "Unregistered {} from {}",
                enrollment.email, enrollment.activity
            ))))
        }
        Err(e) => Err(reject("unregister", e)),
    }
}

fn reject(operation: &str, err: RegistryError) -> ApiError {
    metrics::record_rejection(operation, err.kind());
    tracing::info!(
        operation,
        activity = %err.activity(),
        reason = err.kind(),
        "Request rejected"
    );
    err.into()
}

// ============================================================================
// Health and Metrics Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        activities: state.registry.len(),
    })
}

/// Prometheus metrics endpoint
async fn metrics_handler(State(state): State<AppState>) -> Response {
    for (name, activity) in state.registry.list_activities().await.iter() {
        metrics::set_roster_size(name, activity.enrolled_count());
    }

    match metrics::encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics")
                .into_response()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
