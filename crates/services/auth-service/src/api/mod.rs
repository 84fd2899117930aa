//! HTTP surface: a thin adapter over the auth service.

mod handlers;
mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use handlers::{auth_routes, health_routes, HealthResponse};
pub use state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
