//! Repository trait for verification code persistence.

use async_trait::async_trait;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

/// Durable keyed storage for verification codes, one live record per email.
///
/// The store holds rows as written; whether a record is still usable is
/// decided by the verification service at read time from `expires_at`.
/// `find` therefore returns expired rows too, so the caller can tell
/// "expired" apart from "never requested".
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Delete every record for the code's email, then insert the new one.
    ///
    /// Implementations must present this as a single atomic step: a
    /// concurrent reader sees the old record, no record, or the new record,
    /// never a half-written row.
    async fn replace(&self, code: VerificationCode) -> Result<(), DomainError>;

    /// Return the live record for `email`, or `None` if no record exists.
    async fn find(&self, email: &str) -> Result<Option<VerificationCode>, DomainError>;

    /// Delete the record for `email` (after successful verification).
    async fn remove(&self, email: &str) -> Result<(), DomainError>;

    /// Delete all expired records, returning how many were removed.
    ///
    /// Operational sweep; nothing in the sign-in flow depends on it.
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
