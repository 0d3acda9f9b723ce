use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use rr_core::repositories::{UserRepository, VerificationCodeRepository};
use rr_core::services::verification::MailerService;
use rr_shared::types::ApiResponse;
use rr_shared::utils::mask_email;

use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::dto::ErrorResponse;
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/send-code
///
/// Generates a sign-in code for the given email, stores it (replacing any
/// previous code for that address), and delivers it by email.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": { "message": "Verification code sent. Check your inbox." },
///     "timestamp": "2025-08-14T10:00:00Z",
///     "request_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: malformed payload or invalid email address
/// - 503 Service Unavailable: the mail provider rejected the message
pub async fn send_code<U, M, R>(
    state: web::Data<AppState<U, M, R>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MailerService + 'static,
    R: VerificationCodeRepository + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    if let Err(errors) = request.validate() {
        log::warn!("[{}] Invalid send-code payload: {}", request_id, errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            "Please enter a valid email address",
        ));
    }

    log::info!(
        "[{}] Requesting sign-in code for {}",
        request_id,
        mask_email(&request.email)
    );

    match state.auth_service.send_verification_code(&request.email).await {
        Ok(result) => {
            log::info!(
                "[{}] Sign-in code sent to {}, message_id: {}",
                request_id,
                mask_email(&request.email),
                result.message_id
            );

            HttpResponse::Ok().json(
                ApiResponse::success(SendCodeResponse {
                    message: "Verification code sent. Check your inbox.".to_string(),
                })
                .with_request_id(request_id),
            )
        }
        Err(error) => {
            log::warn!(
                "[{}] Failed to send sign-in code to {}: {}",
                request_id,
                mask_email(&request.email),
                error
            );
            handle_domain_error(error)
        }
    }
}
