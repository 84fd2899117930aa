//! Application state for dependency injection.

use std::sync::Arc;
use std::time::Duration;

use crate::service::AuthService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    /// Deadline applied to each request's collaborator calls
    pub request_timeout: Duration,
}

impl AppState {
    /// Create new app state.
    pub fn new(auth_service: Arc<dyn AuthService>, request_timeout: Duration) -> Self {
        Self {
            auth_service,
            request_timeout,
        }
    }
}
