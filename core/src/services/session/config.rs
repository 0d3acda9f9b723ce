//! Configuration for the session service

/// Configuration for session token issuance
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret for HS256 token signing
    pub jwt_secret: String,

    /// Token issuer claim
    pub issuer: String,

    /// Minutes until an access token expires
    pub token_ttl_minutes: i64,

    /// Emails granted the admin role at sign-in.
    ///
    /// Passed in explicitly at startup so authorization state is visible
    /// in one place instead of living in a mutable global.
    pub admin_emails: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("change-me-in-production"),
            issuer: String::from("reelroom"),
            token_ttl_minutes: 60 * 24,
            admin_emails: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// `ADMIN_EMAILS` is a comma-separated list.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            token_ttl_minutes: std::env::var("SESSION_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.token_ttl_minutes),
            admin_emails: std::env::var("ADMIN_EMAILS")
                .map(|v| {
                    v.split(',')
                        .map(|e| e.trim().to_lowercase())
                        .filter(|e| !e.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Whether an email is on the admin list (case-insensitive)
    pub fn is_admin(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails.iter().any(|a| a.to_lowercase() == email)
    }
}
