//! Per-request cancellation and deadline.
//!
//! Every collaborator call made on behalf of a request runs through
//! [`RequestContext::run`], so a canceled or expired request stops waiting
//! on I/O and reports a cancellation error instead.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use domain::{DomainError, DomainResult};

/// Cancellation signal and optional deadline carried through a request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Background context: never canceled, no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Derive a context canceled together with this one.
    ///
    /// The child keeps the parent's deadline; canceling the child does not
    /// cancel the parent.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Signal cancellation to every call running under this context.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Check the context without waiting.
    pub fn check(&self) -> DomainResult<()> {
        if self.token.is_cancelled() {
            return Err(DomainError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(DomainError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Drive `fut` until it completes, the context is canceled, or the
    /// deadline passes, whichever comes first.
    pub async fn run<F, T>(&self, fut: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        self.check()?;

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(DomainError::Canceled),
            _ = expired => Err(DomainError::DeadlineExceeded),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_context_passes_result_through() {
        let ctx = RequestContext::new();
        assert_eq!(ctx.run(async { Ok(7) }).await, Ok(7));
        assert_eq!(
            ctx.run(async { Err::<(), _>(DomainError::internal("boom")) }).await,
            Err(DomainError::internal("boom"))
        );
    }

    #[tokio::test]
    async fn test_cancelled_context_never_polls() {
        let ctx = RequestContext::new();
        ctx.cancel();

        let mut polled = false;
        let result = ctx
            .run(async {
                polled = true;
                Ok(())
            })
            .await;

        assert_eq!(result, Err(DomainError::Canceled));
        assert!(!polled);
    }

    #[tokio::test]
    async fn test_cancel_while_waiting() {
        let ctx = RequestContext::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result: DomainResult<()> = ctx.run(std::future::pending()).await;
        assert_eq!(result, Err(DomainError::Canceled));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));

        let result: DomainResult<()> = ctx.run(std::future::pending()).await;
        assert_eq!(result, Err(DomainError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_child_follows_parent() {
        let parent = RequestContext::new();
        let child = parent.child();

        child.cancel();
        assert!(!parent.is_cancelled());

        let other = parent.child();
        parent.cancel();
        assert!(other.is_cancelled());
        assert_eq!(other.check(), Err(DomainError::Canceled));
    }

    #[tokio::test]
    async fn test_child_keeps_deadline() {
        let parent = RequestContext::with_timeout(Duration::from_secs(5));
        let child = parent.child();

        assert!(child.deadline.is_some());
        assert_eq!(child.deadline, parent.deadline);
    }
}
