//! Main authentication service implementation

use std::sync::Arc;

use rr_shared::utils::mask_email;

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{UserRepository, VerificationCodeRepository};
use crate::services::session::SessionService;
use crate::services::verification::{MailerService, SendCodeResult, VerificationService};

use super::config::AuthServiceConfig;

/// Authentication service for the passwordless email sign-in flow
pub struct AuthService<U, M, R>
where
    U: UserRepository,
    M: MailerService,
    R: VerificationCodeRepository,
{
    /// User repository for account lookups and creation
    user_repository: Arc<U>,
    /// Verification service for code handling
    verification_service: Arc<VerificationService<M, R>>,
    /// Session service for token issuance
    session_service: Arc<SessionService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, M, R> AuthService<U, M, R>
where
    U: UserRepository,
    M: MailerService,
    R: VerificationCodeRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<M, R>>,
        session_service: Arc<SessionService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            session_service,
            config,
        }
    }

    /// Send a verification code to an email address
    ///
    /// Validates the address and delegates to the verification service,
    /// which persists the code and then attempts delivery.
    pub async fn send_verification_code(&self, email: &str) -> DomainResult<SendCodeResult> {
        self.verification_service.send_verification_code(email).await
    }

    /// Verify a code and establish an authenticated session
    ///
    /// This method:
    /// 1. Delegates to the verification service (consumes the code on match)
    /// 2. Looks up the account for the email, creating it on first sign-in
    /// 3. Updates the last-login timestamp
    /// 4. Issues a session token bound to the account
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<AuthResponse> {
        self.verification_service.verify_code(email, code).await?;

        let (user, is_new_user) = match self.user_repository.find_by_email(email).await? {
            Some(existing) => {
                if existing.is_blocked {
                    return Err(DomainError::Auth(AuthError::UserBlocked));
                }
                (existing, false)
            }
            None => {
                if !self.config.allow_registration {
                    return Err(DomainError::Auth(AuthError::RegistrationDisabled));
                }

                let user = self
                    .user_repository
                    .create(User::new(email.to_string()))
                    .await?;

                tracing::info!(
                    email = %mask_email(email),
                    user_id = %user.id,
                    event = "user_registered",
                    "Created account on first verified sign-in"
                );

                (user, true)
            }
        };

        let mut user = user;
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        let token = self.session_service.issue_session(&user)?;

        tracing::info!(
            email = %mask_email(email),
            user_id = %user.id,
            event = "session_issued",
            "Authenticated session established"
        );

        Ok(AuthResponse::new(
            token.access_token,
            token.expires_in,
            is_new_user,
        ))
    }
}
