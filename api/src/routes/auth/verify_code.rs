use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use rr_core::repositories::{UserRepository, VerificationCodeRepository};
use rr_core::services::verification::MailerService;
use rr_shared::utils::mask_email;

use crate::dto::auth::{AuthResponse, VerifyCodeRequest};
use crate::dto::ErrorResponse;
use crate::handlers::handle_domain_error;

use super::AppState;

/// Handler for POST /api/v1/auth/verify-code
///
/// Verifies the code sent to an email address and establishes an
/// authenticated session, creating the account on first sign-in.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "code": "123456" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJhbGciOiJIUzI1NiIs...",
///     "token_type": "Bearer",
///     "expires_in": 86400,
///     "is_new_user": true
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: malformed payload, or an invalid/expired code
///   (one generic message for every verification failure)
/// - 403 Forbidden: account blocked, or registration disabled
pub async fn verify_code<U, M, R>(
    state: web::Data<AppState<U, M, R>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MailerService + 'static,
    R: VerificationCodeRepository + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    if let Err(errors) = request.validate() {
        log::warn!("[{}] Invalid verify-code payload: {}", request_id, errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            "Invalid request data",
        ));
    }

    match state
        .auth_service
        .verify_code(&request.email, &request.code)
        .await
    {
        Ok(auth) => {
            log::info!(
                "[{}] Sign-in completed for {}",
                request_id,
                mask_email(&request.email)
            );

            HttpResponse::Ok().json(AuthResponse {
                access_token: auth.access_token,
                token_type: auth.token_type,
                expires_in: auth.expires_in,
                is_new_user: auth.is_new_user,
            })
        }
        Err(error) => {
            log::info!(
                "[{}] Sign-in failed for {}: {}",
                request_id,
                mask_email(&request.email),
                error
            );
            handle_domain_error(error)
        }
    }
}
