//! Verification code entity for email-based sign-in.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code value; keeps every code at six digits
pub const CODE_MIN: u32 = 100_000;

/// Largest code value
pub const CODE_MAX: u32 = 999_999;

/// Expiration time for verification codes (10 minutes, fixed product-wide)
pub const CODE_TTL_MINUTES: i64 = 10;

/// A one-time sign-in code tied to an email address.
///
/// At most one live record exists per email; requesting a new code replaces
/// the previous one. The record is never mutated after creation: it is
/// deleted on successful verification, superseded by a newer request, or
/// simply left to expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Email address the code was issued for (natural key)
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new verification code with the standard expiry.
    pub fn new(email: String) -> Self {
        Self::new_with_expiration(email, CODE_TTL_MINUTES)
    }

    /// Creates a new verification code with a custom expiration time.
    ///
    /// Used by tests to place a record near or past its expiry boundary;
    /// production callers always go through [`VerificationCode::new`].
    pub fn new_with_expiration(email: String, expiration_minutes: i64) -> Self {
        let code = Self::generate_code();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(expiration_minutes);

        Self {
            email,
            code,
            created_at: now,
            expires_at,
        }
    }

    /// Generates a random 6-digit code, uniform over [100000, 999999].
    ///
    /// Draws from the OS CSPRNG. Codes gate account access, so a
    /// general-purpose PRNG is not acceptable here.
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        let code: u32 = rng.gen_range(CODE_MIN..=CODE_MAX);
        format!("{:06}", code)
    }

    /// Checks if the verification code has expired.
    ///
    /// Expiry is derived at read time; there is no stored "expired" state.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Gets the time remaining until expiration, or zero if expired.
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_verification_code() {
        let email = "reviewer@example.com".to_string();
        let code = VerificationCode::new(email.clone());

        assert_eq!(code.email, email);
        assert_eq!(code.code.len(), CODE_LENGTH);
        assert!(!code.is_expired());
        assert_eq!(
            code.expires_at,
            code.created_at + Duration::minutes(CODE_TTL_MINUTES)
        );
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = VerificationCode::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let num: u32 = code.parse().expect("generated code should be numeric");
            assert!((CODE_MIN..=CODE_MAX).contains(&num));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100)
            .map(|_| VerificationCode::generate_code())
            .collect();

        // Not all equal (collisions across 100 draws of 900k values are
        // possible, identical outputs are not)
        let unique_count = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique_count > 1);
    }

    #[test]
    fn test_custom_expiration() {
        let code =
            VerificationCode::new_with_expiration("reviewer@example.com".to_string(), 3);
        let expected = code.created_at + Duration::minutes(3);
        assert_eq!(code.expires_at, expected);
    }

    #[test]
    fn test_is_expired() {
        let mut code = VerificationCode::new("reviewer@example.com".to_string());
        assert!(!code.is_expired());

        code.expires_at = Utc::now() - Duration::seconds(1);
        assert!(code.is_expired());
        assert_eq!(code.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_time_until_expiration() {
        let code = VerificationCode::new("reviewer@example.com".to_string());

        let remaining = code.time_until_expiration();
        assert!(remaining <= Duration::minutes(CODE_TTL_MINUTES));
        assert!(remaining > Duration::minutes(CODE_TTL_MINUTES - 1));
    }

    #[test]
    fn test_serialization() {
        let code = VerificationCode::new("reviewer@example.com".to_string());

        let json = serde_json::to_string(&code).unwrap();
        let deserialized: VerificationCode = serde_json::from_str(&json).unwrap();

        assert_eq!(code, deserialized);
    }
}
