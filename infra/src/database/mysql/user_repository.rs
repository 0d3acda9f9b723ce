//! MySQL implementation of the user repository

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use rr_core::domain::entities::user::User;
use rr_core::errors::DomainError;
use rr_core::repositories::UserRepository;
use rr_shared::utils::mask_email;

/// User repository backed by MySQL
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlUserRepository {
    /// Create a new repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::storage_error("Failed to read id column", e))?;
        let id = Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
            message: format!("Invalid user id in database: {}", e),
        })?;

        Ok(User {
            id,
            email: row
                .try_get("email")
                .map_err(|e| Self::storage_error("Failed to read email column", e))?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| Self::storage_error("Failed to read display_name column", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| Self::storage_error("Failed to read created_at column", e))?,
            updated_at: row
                .try_get("updated_at")
                .map_err(|e| Self::storage_error("Failed to read updated_at column", e))?,
            last_login_at: row
                .try_get("last_login_at")
                .map_err(|e| Self::storage_error("Failed to read last_login_at column", e))?,
            is_blocked: row
                .try_get("is_blocked")
                .map_err(|e| Self::storage_error("Failed to read is_blocked column", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, display_name, created_at, updated_at, last_login_at, is_blocked
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                email = %mask_email(email),
                error = %e,
                "Failed to query user by email"
            );
            Self::storage_error("Failed to query user by email", e)
        })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, display_name, created_at, updated_at, last_login_at, is_blocked
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::storage_error("Failed to query user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, display_name, created_at, updated_at, last_login_at, is_blocked)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.last_login_at)
        .bind(user.is_blocked)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                email = %mask_email(&user.email),
                error = %e,
                "Failed to create user"
            );
            Self::storage_error("Failed to create user", e)
        })?;

        debug!(
            email = %mask_email(&user.email),
            user_id = %user.id,
            "Created user"
        );

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = ?, display_name = ?, updated_at = ?, last_login_at = ?, is_blocked = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.updated_at)
        .bind(user.last_login_at)
        .bind(user.is_blocked)
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::storage_error("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
