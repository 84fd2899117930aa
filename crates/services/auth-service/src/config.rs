//! Auth service configuration.

use std::env;
use std::time::Duration;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig, ServiceConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub service: ServiceConfig,
    pub jwt: JwtConfig,
    /// `None` runs on the in-memory user store
    pub database: Option<DatabaseConfig>,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if `JWT_SECRET` is missing or shorter than `MIN_JWT_SECRET_LENGTH`.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .or_else(|| lookup("AUTH_SERVICE_JWT_SECRET"))
            .ok_or_else(|| AppError::config("JWT_SECRET must be set"))?;

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let defaults = ServiceConfig::default();
        let service = ServiceConfig {
            host: lookup("AUTH_SERVICE_HOST").unwrap_or(defaults.host),
            port: lookup("AUTH_SERVICE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            ..defaults
        };

        let jwt = JwtConfig {
            secret,
            expiration_hours: lookup("JWT_EXPIRATION_HOURS")
                .and_then(|h| h.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
        };

        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            ..DatabaseConfig::default()
        });

        Ok(Self {
            service,
            jwt,
            database,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.service.request_timeout_secs)
    }
}
