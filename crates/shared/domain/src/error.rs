//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).
//!
//! Callers test the category of an error through [`DomainError::kind`] or
//! [`DomainError::is`], never through its message.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input shape violates a registration rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Another user already holds the username
    #[error("username is already taken")]
    UsernameTaken,

    /// Another user already holds the email address
    #[error("email is already taken")]
    EmailTaken,

    /// No record matches a lookup
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request was canceled by its caller
    #[error("request canceled")]
    Canceled,

    /// The request deadline passed before a collaborator answered
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// Any other collaborator failure (storage outage, issuer failure)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error category, the stable "is-a" view of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    UsernameTaken,
    EmailTaken,
    NotFound,
    Canceled,
    System,
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::UsernameTaken => ErrorKind::UsernameTaken,
            DomainError::EmailTaken => ErrorKind::EmailTaken,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::Canceled | DomainError::DeadlineExceeded => ErrorKind::Canceled,
            DomainError::Internal(_) => ErrorKind::System,
        }
    }

    /// Check whether this error belongs to `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// True for the conflict sentinels (username or email taken).
    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::UsernameTaken | DomainError::EmailTaken)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
