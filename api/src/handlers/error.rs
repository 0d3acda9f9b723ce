//! Maps domain errors to HTTP responses.

use actix_web::HttpResponse;

use rr_core::errors::{AuthError, DomainError};

use crate::dto::ErrorResponse;

/// Single user-facing message for every verification failure.
///
/// `NoPendingCode`, `VerificationCodeExpired` and `InvalidVerificationCode`
/// are deliberately indistinguishable to the caller, so the endpoint cannot
/// be used to probe which emails have codes pending.
const INVALID_CODE_MESSAGE: &str = "Invalid or expired verification code";

/// Convert a domain error into the appropriate HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_verification_failure() {
        // Expected outcome of normal usage (typos, stale tabs); log quietly
        log::info!("Verification failed: {}", error);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "invalid_or_expired_code",
            INVALID_CODE_MESSAGE,
        ));
    }

    match &error {
        DomainError::Auth(AuthError::InvalidEmailFormat { email }) => {
            log::warn!("Rejected invalid email: {}", email);
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_email",
                "Please enter a valid email address",
            ))
        }
        DomainError::Auth(AuthError::MailDeliveryFailure) => {
            log::error!("Mail delivery failure");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                "mail_delivery_failed",
                "Failed to send the verification code. Please try again later.",
            ))
        }
        DomainError::Auth(AuthError::UserBlocked) => {
            HttpResponse::Forbidden().json(ErrorResponse::new(
                "account_blocked",
                "This account has been suspended",
            ))
        }
        DomainError::Auth(AuthError::RegistrationDisabled) => {
            HttpResponse::Forbidden().json(ErrorResponse::new(
                "registration_disabled",
                "Sign-ups are currently closed",
            ))
        }
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse::new(
            "unauthorized",
            "Authentication required",
        )),
        DomainError::NotFound { resource } => {
            log::warn!("Not found: {}", resource);
            HttpResponse::NotFound()
                .json(ErrorResponse::new("not_found", "The requested resource was not found"))
        }
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new("validation_error", message.clone())),
        DomainError::ValidationErr(e) => HttpResponse::BadRequest()
            .json(ErrorResponse::new("validation_error", e.to_string())),
        _ => {
            log::error!("Internal error: {:?}", error);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}
