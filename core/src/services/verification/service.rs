//! Main verification service implementation

use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use rr_shared::utils::mask_email;

use crate::domain::entities::verification_code::{VerificationCode, CODE_LENGTH};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::VerificationCodeRepository;

use super::config::VerificationServiceConfig;
use super::traits::MailerService;
use super::types::SendCodeResult;

/// Verification service for handling email sign-in codes
pub struct VerificationService<M: MailerService, R: VerificationCodeRepository> {
    /// Mail service for delivering codes
    mailer: Arc<M>,
    /// Durable store for pending codes
    repository: Arc<R>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<M: MailerService, R: VerificationCodeRepository> VerificationService<M, R> {
    /// Create a new verification service
    pub fn new(mailer: Arc<M>, repository: Arc<R>, config: VerificationServiceConfig) -> Self {
        Self {
            mailer,
            repository,
            config,
        }
    }

    /// Send a verification code to an email address
    ///
    /// This method:
    /// 1. Validates the email address format (syntactic check)
    /// 2. Generates a new 6-digit code
    /// 3. Replaces any previous code for this email in the store
    /// 4. Delivers the code via the mail provider
    ///
    /// The record is persisted before the delivery attempt. A failed send
    /// therefore leaves a valid, undelivered code in the store; its exposure
    /// is bounded by the code TTL, and the next request supersedes it.
    pub async fn send_verification_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        if !self.mailer.is_valid_email(email) {
            return Err(DomainError::Auth(AuthError::InvalidEmailFormat {
                email: mask_email(email),
            }));
        }

        let verification_code =
            VerificationCode::new_with_expiration(email.to_string(), self.config.code_ttl_minutes);

        tracing::info!(
            email = %mask_email(email),
            event = "code_generated",
            expires_at = %verification_code.expires_at,
            "Generated new verification code"
        );

        // Supersedes any earlier code for this email; only the newest is valid
        self.repository
            .replace(verification_code.clone())
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code"
                );
                e
            })?;

        let message_id = self
            .mailer
            .send_verification_code(email, &verification_code.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::Auth(AuthError::MailDeliveryFailure)
            })?;

        tracing::info!(
            email = %mask_email(email),
            message_id = %message_id,
            event = "code_sent",
            "Verification code delivered to mail provider"
        );

        Ok(SendCodeResult {
            verification_code,
            message_id,
        })
    }

    /// Verify a submitted code against the stored record
    ///
    /// Failure reasons, in checking order:
    /// - no record for the email: [`AuthError::NoPendingCode`]
    /// - record past its expiry: [`AuthError::VerificationCodeExpired`]
    ///   (the record stays in place; the next send request replaces it)
    /// - code mismatch: [`AuthError::InvalidVerificationCode`] (the record
    ///   stays intact, so the user may retry until the code expires)
    ///
    /// On success the record is deleted before returning, which makes a
    /// code single-use: an immediately repeated submission fails with
    /// `NoPendingCode`.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<()> {
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                email = %mask_email(email),
                event = "invalid_code_format",
                code_length = code.len(),
                "Invalid verification code format"
            );
            return Err(DomainError::Auth(AuthError::InvalidVerificationCode));
        }

        let record = match self.repository.find(email).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "no_pending_code",
                    "Verification attempted with no pending code"
                );
                return Err(DomainError::Auth(AuthError::NoPendingCode));
            }
        };

        if record.is_expired() {
            tracing::warn!(
                email = %mask_email(email),
                event = "code_expired",
                expired_at = %record.expires_at,
                "Verification attempted with expired code"
            );
            return Err(DomainError::Auth(AuthError::VerificationCodeExpired));
        }

        if !Self::codes_match(&record.code, code) {
            tracing::warn!(
                email = %mask_email(email),
                event = "code_mismatch",
                "Verification attempted with wrong code"
            );
            return Err(DomainError::Auth(AuthError::InvalidVerificationCode));
        }

        self.repository.remove(email).await?;

        tracing::info!(
            email = %mask_email(email),
            event = "code_verified",
            "Verification code accepted and consumed"
        );

        Ok(())
    }

    /// Delete expired records from the store, returning the count removed
    ///
    /// Operational maintenance; stale rows are already invisible to the
    /// verify path.
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let deleted = self.repository.delete_expired().await?;
        if deleted > 0 {
            tracing::info!(
                deleted = deleted,
                event = "expired_codes_purged",
                "Removed expired verification codes"
            );
        }
        Ok(deleted)
    }

    /// Constant-time comparison of the stored and submitted codes
    fn codes_match(stored: &str, submitted: &str) -> bool {
        if stored.len() != submitted.len() {
            return false;
        }
        constant_time_eq(stored.as_bytes(), submitted.as_bytes())
    }
}
