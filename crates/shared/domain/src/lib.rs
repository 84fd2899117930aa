//! Domain layer - Core registration types and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the registration input and its rules, the user entity, and the error
//! taxonomy shared by the service and its adapters.

pub mod constants;
pub mod error;
pub mod password;
pub mod register;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, ErrorKind};
pub use password::Password;
pub use register::RegisterInput;
pub use user::{AuthResponse, AuthResponseBody, User, UserResponse};
