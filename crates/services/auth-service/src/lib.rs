//! Auth Service Library
//!
//! User registration for the posting application: validates and sanitizes
//! registration input, enforces username and email uniqueness through a
//! user repository, creates the user and issues an access token.
//!
//! The core is [`service::Authenticator`]. Its collaborators are the
//! [`repository::UserRepository`] and [`token::TokenIssuer`] ports; the HTTP
//! surface in [`api`] is a thin adapter.

pub mod api;
pub mod config;
pub mod context;
pub mod repository;
pub mod service;
pub mod token;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::config::AuthServiceConfig;
use crate::repository::{MemoryUserStore, UserRepository, UserStore};
use crate::service::Authenticator;
use crate::token::JwtIssuer;
use common::{AppError, AppResult};

pub use context::RequestContext;

/// Wire the service graph described by `config`.
pub async fn build_state(config: &AuthServiceConfig) -> AppResult<AppState> {
    let users: Arc<dyn UserRepository> = match &config.database {
        Some(database) => {
            let store = UserStore::connect(database).await?;
            store.ensure_schema().await?;
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory user store");
            Arc::new(MemoryUserStore::new())
        }
    };

    let tokens = Arc::new(JwtIssuer::new(&config.jwt.secret, config.jwt.expiration_hours)?);
    let auth_service = Arc::new(Authenticator::new(users, tokens));

    Ok(AppState::new(auth_service, config.request_timeout()))
}

/// Run the HTTP server until it stops.
pub async fn run_server(config: AuthServiceConfig) -> AppResult<()> {
    let state = build_state(&config).await?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .service
        .addr()
        .parse()
        .map_err(|e| AppError::config(format!("invalid listen address: {}", e)))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("bind {}: {}", addr, e)))?;
    info!("Auth service listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("server error: {}", e)))
}
