//! Authentication service - Handles user registration.
//!
//! Register runs a strict sequence: sanitize, validate, username lookup,
//! email lookup, create, issue token. The first failure ends the request and
//! no later collaborator is called.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::context::RequestContext;
use crate::repository::UserRepository;
use crate::token::TokenIssuer;
use domain::{AuthResponse, DomainError, DomainResult, RegisterInput, User};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue its access token.
    ///
    /// # Errors
    /// - `Validation` if the input breaks a registration rule (no collaborator
    ///   is called)
    /// - `UsernameTaken` / `EmailTaken` on a uniqueness conflict, whether
    ///   found by lookup or reported by the repository on create
    /// - `Canceled` / `DeadlineExceeded` if `ctx` ends first
    /// - any other collaborator error, unchanged
    ///
    /// A token issuance failure leaves the created user in place.
    async fn register(&self, ctx: &RequestContext, input: RegisterInput)
        -> DomainResult<AuthResponse>;
}

/// Concrete implementation of AuthService over a user repository and a
/// token issuer.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }
}

/// NotFound means the value is free; a found user means `conflict`.
fn ensure_vacant(lookup: DomainResult<User>, conflict: DomainError) -> DomainResult<()> {
    match lookup {
        Ok(_) => Err(conflict),
        Err(DomainError::NotFound(_)) => Ok(()),
        Err(err) => Err(err),
    }
}

#[async_trait]
impl AuthService for Authenticator {
    #[tracing::instrument(skip_all)]
    async fn register(
        &self,
        ctx: &RequestContext,
        mut input: RegisterInput,
    ) -> DomainResult<AuthResponse> {
        input.sanitize();
        input.validate()?;
        ctx.check()?;

        let username_lookup = ctx.run(self.users.get_by_username(ctx, &input.username)).await;
        ensure_vacant(username_lookup, DomainError::UsernameTaken).inspect_err(|err| {
            if err.is_conflict() {
                warn!(username = %input.username, "Username already taken");
            }
        })?;

        let email_lookup = ctx.run(self.users.get_by_email(ctx, &input.email)).await;
        ensure_vacant(email_lookup, DomainError::EmailTaken).inspect_err(|err| {
            if err.is_conflict() {
                warn!(email = %input.email, "Email already taken");
            }
        })?;

        let RegisterInput {
            username,
            email,
            password,
            ..
        } = input;
        let user = ctx
            .run(self.users.create(ctx, User::new(username, email, password)))
            .await?;

        let access_token = ctx.run(self.tokens.issue(ctx, &user)).await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(AuthResponse::new(access_token, user))
    }
}
