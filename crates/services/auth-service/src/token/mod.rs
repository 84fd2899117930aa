//! Access token issuance.

mod jwt;

use async_trait::async_trait;

use crate::context::RequestContext;
use domain::{DomainResult, User};

pub use jwt::{Claims, JwtIssuer};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Produces an access credential for a persisted user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issue an access token for `user`
    async fn issue(&self, ctx: &RequestContext, user: &User) -> DomainResult<String>;
}
