//! Configuration for the verification service

use crate::domain::entities::verification_code::CODE_TTL_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires.
    ///
    /// Fixed product-wide; not configurable per request.
    pub code_ttl_minutes: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: CODE_TTL_MINUTES,
        }
    }
}
