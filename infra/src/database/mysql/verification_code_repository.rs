//! MySQL storage for verification codes
//!
//! One live row per email. `replace` runs its delete+insert inside a
//! transaction so a concurrent verifier observes the old row, no row, or
//! the new row, never a partially written one.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error, info};

use rr_core::domain::entities::verification_code::VerificationCode;
use rr_core::errors::DomainError;
use rr_core::repositories::VerificationCodeRepository;
use rr_shared::utils::mask_email;

/// Verification code repository backed by MySQL
pub struct MySqlVerificationCodeRepository {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlVerificationCodeRepository {
    /// Create a new repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn replace(&self, code: VerificationCode) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::storage_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM verification_codes WHERE email = ?")
            .bind(&code.email)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(&code.email),
                    error = %e,
                    "Failed to delete superseded verification codes"
                );
                Self::storage_error("Failed to delete superseded codes", e)
            })?;

        sqlx::query(
            r#"
            INSERT INTO verification_codes (email, code, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&code.email)
        .bind(&code.code)
        .bind(code.created_at)
        .bind(code.expires_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                email = %mask_email(&code.email),
                error = %e,
                "Failed to insert verification code"
            );
            Self::storage_error("Failed to insert verification code", e)
        })?;

        tx.commit()
            .await
            .map_err(|e| Self::storage_error("Failed to commit code replacement", e))?;

        info!(
            email = %mask_email(&code.email),
            "Stored verification code"
        );

        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<VerificationCode>, DomainError> {
        // No expiry filter here: the verifier needs expired rows too, so it
        // can report "expired" rather than "never requested"
        let row = sqlx::query(
            r#"
            SELECT email, code, created_at, expires_at
            FROM verification_codes
            WHERE email = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                email = %mask_email(email),
                error = %e,
                "Failed to look up verification code"
            );
            Self::storage_error("Failed to look up verification code", e)
        })?;

        match row {
            Some(row) => {
                let code = VerificationCode {
                    email: row
                        .try_get("email")
                        .map_err(|e| Self::storage_error("Failed to read email column", e))?,
                    code: row
                        .try_get("code")
                        .map_err(|e| Self::storage_error("Failed to read code column", e))?,
                    created_at: row
                        .try_get("created_at")
                        .map_err(|e| Self::storage_error("Failed to read created_at column", e))?,
                    expires_at: row
                        .try_get("expires_at")
                        .map_err(|e| Self::storage_error("Failed to read expires_at column", e))?,
                };

                debug!(email = %mask_email(email), "Found verification code");
                Ok(Some(code))
            }
            None => {
                debug!(email = %mask_email(email), "No verification code on file");
                Ok(None)
            }
        }
    }

    async fn remove(&self, email: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM verification_codes WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to delete verification code"
                );
                Self::storage_error("Failed to delete verification code", e)
            })?;

        debug!(email = %mask_email(email), "Deleted verification code");
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("Failed to delete expired codes", e))?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            info!(deleted = deleted, "Cleaned up expired verification codes");
        }

        Ok(deleted)
    }
}
