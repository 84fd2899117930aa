//! Repository layer for user persistence.
//!
//! `UserRepository` is the port the auth service consumes. Two adapters
//! implement it: `UserStore` (SeaORM, Postgres) and `MemoryUserStore`.

pub mod entities;
mod memory;
mod user_repository;

pub use memory::MemoryUserStore;
pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
