//! Mail Service Interface
//!
//! Defines the trait for transactional mail implementations that deliver
//! sign-in codes and other account mail.

use async_trait::async_trait;

use rr_core::domain::entities::verification_code::CODE_TTL_MINUTES;

use crate::InfraError;

/// Mail service trait for sending transactional email
///
/// Implementations include:
/// - HTTP mail provider API
/// - Mock implementation for development
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email message
    ///
    /// # Arguments
    ///
    /// * `to` - The recipient address
    /// * `subject` - Message subject line
    /// * `body` - Plain-text message body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfraError)` - If sending fails
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfraError>;

    /// Send a verification code
    ///
    /// Convenience method that formats the sign-in code message in the
    /// application's standard wording.
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<String, InfraError> {
        let subject = "Your ReelRoom sign-in code";
        let body = format!(
            "Your ReelRoom sign-in code is: {}. It expires in {} minutes.\n\n\
             If you didn't request this code, you can ignore this email.",
            code, CODE_TTL_MINUTES
        );
        self.send_mail(to, subject, &body).await
    }

    /// Get the provider name (e.g. "Http", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the provider is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
