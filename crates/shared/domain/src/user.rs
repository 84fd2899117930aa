//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_TYPE_BEARER;

/// User domain entity.
///
/// `id` is an opaque identifier assigned by the repository on creation.
/// `password` is opaque to the domain: whatever the repository stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an unsaved user (empty id).
    pub fn new(username: String, email: String, password: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            username,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the repository has assigned an identifier
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique user identifier
    pub id: String,
    /// Unique username
    pub username: String,
    /// User email address (lowercased)
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

impl AuthResponse {
    pub fn new(access_token: String, user: User) -> Self {
        Self { access_token, user }
    }
}

/// Wire shape of [`AuthResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponseBody {
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    pub user: UserResponse,
}

impl From<AuthResponse> for AuthResponseBody {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            user: UserResponse::from(response.user),
        }
    }
}
