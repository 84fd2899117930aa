//! User repository port and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, Schema, Set, SqlErr,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::context::RequestContext;
use common::DatabaseConfig;
use domain::{DomainError, DomainResult, Password, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return [`DomainError::NotFound`] when no record matches; they never
/// signal absence with a default `User`.
///
/// `create` must enforce username and email uniqueness itself and report a
/// collision as [`DomainError::UsernameTaken`] or [`DomainError::EmailTaken`].
/// The service's pre-create lookups do not make registration atomic.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, returning it with id and timestamps populated
    async fn create(&self, ctx: &RequestContext, user: User) -> DomainResult<User>;

    /// Find user by exact username
    async fn get_by_username(&self, ctx: &RequestContext, username: &str) -> DomainResult<User>;

    /// Find user by email address (case-insensitive)
    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> DomainResult<User>;
}

/// Postgres-backed implementation of UserRepository.
///
/// Passwords are argon2-hashed on insert. Uniqueness is enforced by the
/// `UNIQUE` columns of the `users` table.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open a connection pool for `config`.
    pub async fn connect(config: &DatabaseConfig) -> DomainResult<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let db = Database::connect(options).await.map_err(db_error)?;
        info!("Database connected");
        Ok(Self::new(db))
    }

    /// Create the `users` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> DomainResult<()> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(UserEntity);
        statement.if_not_exists();

        self.db
            .execute(backend.build(&statement))
            .await
            .map_err(db_error)?;
        debug!("users table ready");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, ctx: &RequestContext, user: User) -> DomainResult<User> {
        ctx.check()?;

        let password_hash = ctx.run(hash_password(user.password)).await?;
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(user.username),
            email: Set(user.email.to_lowercase()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(insert_error)?;
        Ok(User::from(model))
    }

    async fn get_by_username(&self, ctx: &RequestContext, username: &str) -> DomainResult<User> {
        ctx.check()?;

        UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(User::from)
            .ok_or_else(|| DomainError::not_found("user"))
    }

    async fn get_by_email(&self, ctx: &RequestContext, email: &str) -> DomainResult<User> {
        ctx.check()?;

        UserEntity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(User::from)
            .ok_or_else(|| DomainError::not_found("user"))
    }
}

/// Argon2 runs on the blocking pool. A rejected password is a storage
/// failure here; input rules belong to the caller.
async fn hash_password(plain_text: String) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || Password::new(&plain_text).map(Password::into_string))
        .await
        .map_err(|e| DomainError::internal(format!("password hashing task: {}", e)))?
        .map_err(|e| DomainError::internal(format!("password hashing: {}", e)))
}

fn db_error(err: DbErr) -> DomainError {
    DomainError::internal(format!("database: {}", err))
}

/// Translate a unique-constraint violation back into a conflict sentinel.
fn insert_error(err: DbErr) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            conflict_from_violation(&detail).unwrap_or_else(|| db_error(err))
        }
        _ => db_error(err),
    }
}

/// Postgres names the constraints `users_username_key` / `users_email_key`.
fn conflict_from_violation(detail: &str) -> Option<DomainError> {
    let detail = detail.to_lowercase();
    if detail.contains("username") {
        Some(DomainError::UsernameTaken)
    } else if detail.contains("email") {
        Some(DomainError::EmailTaken)
    } else {
        None
    }
}
