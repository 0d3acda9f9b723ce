//! Authentication route handlers
//!
//! Endpoints for the passwordless email sign-in flow:
//! - `POST /api/v1/auth/send-code`: deliver a sign-in code
//! - `POST /api/v1/auth/verify-code`: exchange a code for a session

pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use rr_core::repositories::{UserRepository, VerificationCodeRepository};
use rr_core::services::auth::AuthService;
use rr_core::services::verification::MailerService;

/// Application state that holds shared services
pub struct AppState<U, M, R>
where
    U: UserRepository,
    M: MailerService,
    R: VerificationCodeRepository,
{
    pub auth_service: Arc<AuthService<U, M, R>>,
}
