//! Domain-specific error types and error handling.

use thiserror::Error;

/// Authentication-related errors
///
/// The three verification failure reasons (`NoPendingCode`,
/// `VerificationCodeExpired`, `InvalidVerificationCode`) are distinct here
/// for logging and tests, but the API layer collapses all of them into one
/// generic "invalid or expired code" message so a caller cannot probe which
/// emails have codes pending.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email format: {email}")]
    InvalidEmailFormat { email: String },

    #[error("No pending verification code for this email")]
    NoPendingCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Mail delivery failure")]
    MailDeliveryFailure,

    #[error("Session token generation failed")]
    TokenGenerationFailed,

    #[error("Registration is currently disabled")]
    RegistrationDisabled,

    #[error("User account is blocked")]
    UserBlocked,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether this error is one of the three expected verification
    /// failures rather than an exceptional condition.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            DomainError::Auth(AuthError::NoPendingCode)
                | DomainError::Auth(AuthError::VerificationCodeExpired)
                | DomainError::Auth(AuthError::InvalidVerificationCode)
        )
    }
}
