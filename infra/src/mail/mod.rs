//! Mail Delivery Module
//!
//! Implementations of the transactional mail collaborator used to deliver
//! sign-in codes:
//!
//! - **Mailer trait**: common interface for all providers
//! - **HttpMailer**: production delivery via a JSON-over-HTTP provider API
//! - **MockMailer**: log output for development and tests
//! - **MailerServiceAdapter**: bridges any provider into the core seam

pub mod http_mailer;
pub mod mailer;
pub mod mock_mailer;

use std::sync::Arc;

use async_trait::async_trait;
use rr_core::services::verification::MailerService;
use rr_shared::config::MailConfig;
use rr_shared::utils::is_valid_email;

pub use http_mailer::HttpMailer;
pub use mailer::Mailer;
pub use mock_mailer::MockMailer;

/// Adapter that implements the core MailerService seam over any provider
pub struct MailerServiceAdapter {
    inner: Arc<dyn Mailer>,
}

impl MailerServiceAdapter {
    /// Wrap a concrete mail provider
    pub fn new(inner: Arc<dyn Mailer>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl MailerService for MailerServiceAdapter {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(email, code)
            .await
            .map_err(|e| e.to_string())
    }

    fn is_valid_email(&self, email: &str) -> bool {
        is_valid_email(email)
    }
}

/// Create a mail service based on configuration
///
/// Returns the provider selected by `config.provider`, wrapped in the
/// adapter the core services consume. An HTTP provider that fails to
/// initialize falls back to the mock so development setups still boot.
pub fn create_mailer_service(config: &MailConfig) -> MailerServiceAdapter {
    let provider: Arc<dyn Mailer> = if config.is_mock() {
        Arc::new(MockMailer::new())
    } else {
        match HttpMailer::new(config.clone()) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize HTTP mail provider");
                tracing::warn!("Falling back to mock mailer");
                Arc::new(MockMailer::new())
            }
        }
    };

    tracing::info!(provider = provider.provider_name(), "Mail provider selected");
    MailerServiceAdapter::new(provider)
}
