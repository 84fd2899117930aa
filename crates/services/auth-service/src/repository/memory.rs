//! In-process user store.
//!
//! Used when no database is configured and by the HTTP tests. The password
//! payload is stored as given.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::context::RequestContext;
use domain::{DomainError, DomainResult, User};

/// `HashMap`-backed UserRepository keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn create(&self, ctx: &RequestContext, user: User) -> DomainResult<User> {
        ctx.check()?;

        // Check and insert under one write lock
        let mut users = self.users.write().await;
        let email = user.email.to_lowercase();

        if users.values().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameTaken);
        }
        if users.values().any(|u| u.email == email) {
            return Err(DomainError::EmailTaken);
        }

        let now = chrono::Utc::now();
        let created = User {
            id: Uuid::new_v4().to_string(),
            email,
            created_at: now,
            updated_at: now,
            ..user
        };
        users.insert(created.id.clone(), created.clone());

        Ok(created)
    }

    async fn get_by_username(&self, ctx: &RequestContext, username: &str) -> DomainResult<User> {
        ctx.check()?;

        self.users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| DomainError::not_found("user"))
    }

    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> DomainResult<User> {
        ctx.check()?;

        let email = email.to_lowercase();
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DomainError::not_found("user"))
    }
}
