//! Types for verification service results

use crate::domain::entities::verification_code::VerificationCode;

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The verification code record that was persisted
    pub verification_code: VerificationCode,
    /// The mail message ID from the provider
    pub message_id: String,
}
