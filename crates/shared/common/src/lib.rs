//! Common utilities shared across services.
//!
//! This crate provides:
//! - Transport error handling (domain errors to HTTP responses)
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
