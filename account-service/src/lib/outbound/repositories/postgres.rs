use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

/// Postgres-backed user store.
///
/// The `users` table carries UNIQUE constraints on `username` and `email`;
/// a unique violation on insert is the authoritative duplicate signal.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<User, AuthError> {
        let id: Uuid = row.try_get("id").map_err(storage_error)?;
        let username: String = row.try_get("username").map_err(storage_error)?;
        let email: String = row.try_get("email").map_err(storage_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(storage_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage_error)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(storage_error)?;

        Ok(User {
            id: UserId(id),
            username: Username::new(username)
                .map_err(|e| AuthError::Internal(format!("Corrupt username in storage: {}", e)))?,
            email: EmailAddress::new(email)
                .map_err(|e| AuthError::Internal(format!("Corrupt email in storage: {}", e)))?,
            password_hash,
            created_at,
            updated_at,
        })
    }
}

fn storage_error(e: sqlx::Error) -> AuthError {
    AuthError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AuthError::UserAlreadyExists;
                }
            }
            storage_error(e)
        })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1 OR username = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.as_ref().map(Self::map_row).transpose()
    }
}
