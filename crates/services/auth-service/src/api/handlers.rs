//! HTTP handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use super::AppState;
use crate::context::RequestContext;
use common::{AppError, AppResult};
use domain::{AuthResponseBody, RegisterInput};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Register a new user and return its access token.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponseBody>)> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let ctx = RequestContext::with_timeout(state.request_timeout);
    let response = state.auth_service.register(&ctx, input).await?;

    Ok((StatusCode::CREATED, Json(AuthResponseBody::from(response))))
}

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
