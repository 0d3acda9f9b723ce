//! Trait for mail delivery integration

use async_trait::async_trait;

/// Trait for the transactional mail collaborator
///
/// Implementations live in the infrastructure crate. Delivery is
/// fire-and-forget from the domain's perspective: one attempt, no retry,
/// no fallback transport.
#[async_trait]
pub trait MailerService: Send + Sync {
    /// Send a verification code to an email address, returning the
    /// provider's message id
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String>;

    /// Check if the email address format is acceptable (syntactic only)
    fn is_valid_email(&self, email: &str) -> bool;
}
