//! Mail delivery configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the transactional mail provider
///
/// The provider is selected by name; `"mock"` routes mail to the log output
/// for development, anything else is treated as an HTTP API provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Provider name ("mock" or "http")
    pub provider: String,

    /// Base URL of the provider's message API
    pub api_url: String,

    /// API key for the provider
    pub api_key: String,

    /// Sender address shown to recipients
    pub from_address: String,

    /// Sender display name
    pub from_name: String,

    /// Timeout for API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            api_url: String::new(),
            api_key: String::new(),
            from_address: String::from("no-reply@reelroom.example"),
            from_name: String::from("ReelRoom"),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_url: std::env::var("MAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@reelroom.example".to_string()),
            from_name: std::env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "ReelRoom".to_string()),
            request_timeout_secs: std::env::var("MAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }

    /// Whether the mock provider is selected
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }
}

fn default_request_timeout() -> u64 {
    30
}
