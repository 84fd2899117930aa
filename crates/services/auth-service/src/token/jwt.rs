//! HS256 JWT token issuer.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::TokenIssuer;
use crate::context::RequestContext;
use domain::{DomainError, DomainResult, User, MIN_JWT_SECRET_LENGTH};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues signed access tokens.
#[derive(Clone)]
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtIssuer {
    /// Create an issuer signing with `secret`.
    ///
    /// # Errors
    /// Returns a validation error if the secret is shorter than
    /// `MIN_JWT_SECRET_LENGTH` bytes.
    pub fn new(secret: &str, expiration_hours: i64) -> DomainResult<Self> {
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(DomainError::validation(format!(
                "JWT secret must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_hours,
        })
    }

    /// Sign a token for `user`.
    pub fn sign(&self, user: &User) -> DomainResult<String> {
        if !user.is_persisted() {
            return Err(DomainError::internal("cannot issue a token for an unsaved user"));
        }

        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("token signing failed: {}", e)))
    }

    /// Verify a token and extract its claims.
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::internal(format!("token verification failed: {}", e)))
    }
}

#[async_trait]
impl TokenIssuer for JwtIssuer {
    async fn issue(&self, ctx: &RequestContext, user: &User) -> DomainResult<String> {
        ctx.check()?;
        self.sign(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ErrorKind;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn persisted_user() -> User {
        let mut user = User::new("bob".into(), "bob@gmail.com".into(), "password".into());
        user.id = "123".into();
        user
    }

    #[tokio::test]
    async fn test_issue_and_verify() {
        let issuer = JwtIssuer::new(SECRET, 24).unwrap();
        let token = issuer
            .issue(&RequestContext::new(), &persisted_user())
            .await
            .unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "123");
        assert_eq!(claims.username, "bob");
        assert_eq!(claims.exp - claims.iat, 24 * domain::SECONDS_PER_HOUR);
    }

    #[test]
    fn test_short_secret_rejected() {
        let err = JwtIssuer::new("short", 24).unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_foreign_token_rejected() {
        let issuer = JwtIssuer::new(SECRET, 24).unwrap();
        let other = JwtIssuer::new("another-secret-key-that-is-32-chars!!", 24).unwrap();
        let token = other.sign(&persisted_user()).unwrap();

        assert!(issuer.verify(&token).unwrap_err().is(ErrorKind::System));
    }

    #[test]
    fn test_unsaved_user_rejected() {
        let issuer = JwtIssuer::new(SECRET, 24).unwrap();
        let user = User::new("bob".into(), "bob@gmail.com".into(), "password".into());
        assert!(issuer.sign(&user).is_err());
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let issuer = JwtIssuer::new(SECRET, 24).unwrap();
        let ctx = RequestContext::new();
        ctx.cancel();

        let err = issuer.issue(&ctx, &persisted_user()).await.unwrap_err();
        assert_eq!(err, DomainError::Canceled);
    }
}
