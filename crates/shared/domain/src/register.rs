//! Registration input: normalization and shape rules.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::constants::{MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Fields in the order their rules are reported.
const FIELD_ORDER: [&str; 4] = ["username", "email", "password", "confirm_password"];

/// Raw registration input as supplied by the caller.
///
/// Call [`RegisterInput::sanitize`] once, then [`RegisterInput::validate`].
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(
        min = MIN_USERNAME_LENGTH,
        message = "Username must be at least 3 characters"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        message = "Password must be at least 8 characters"
    ))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

// Passwords stay out of logs
impl std::fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

impl RegisterInput {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Normalize in place: trim username and email, lowercase email.
    ///
    /// Passwords are left untouched. Idempotent.
    pub fn sanitize(&mut self) {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();
    }

    /// Check the registration rules without re-sanitizing.
    ///
    /// Every violation is reported as [`DomainError::Validation`] carrying the
    /// message of the first failing field.
    pub fn validate(&self) -> DomainResult<()> {
        Validate::validate(self).map_err(first_violation)
    }
}

fn first_violation(errors: ValidationErrors) -> DomainError {
    let rank = |name: &str| {
        FIELD_ORDER
            .iter()
            .position(|field| *field == name)
            .unwrap_or(FIELD_ORDER.len())
    };

    let message = errors
        .field_errors()
        .into_iter()
        .min_by_key(|(name, _)| {
            let name: &str = name.as_ref();
            rank(name)
        })
        .and_then(|(_, errs)| errs.first())
        .and_then(|err| err.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation failed".to_string());

    DomainError::validation(message)
}
