//! End-to-end test of the email sign-in flow at the service level
//!
//! Walks the whole lifecycle through the public crate API: request a code,
//! verify it, confirm the record is consumed, and confirm a session comes
//! out the other side.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use rr_core::domain::entities::verification_code::CODE_LENGTH;
use rr_core::errors::{AuthError, DomainError};
use rr_core::repositories::{
    MockUserRepository, MockVerificationCodeRepository, VerificationCodeRepository,
};
use rr_core::services::auth::{AuthService, AuthServiceConfig};
use rr_core::services::session::{SessionConfig, SessionService};
use rr_core::services::verification::{
    MailerService, VerificationService, VerificationServiceConfig,
};

/// Captures outgoing mail instead of sending it
struct CapturingMailer {
    sent: Mutex<HashMap<String, String>>,
}

impl CapturingMailer {
    fn new() -> Self {
        Self {
            sent: Mutex::new(HashMap::new()),
        }
    }

    fn last_code(&self, email: &str) -> Option<String> {
        self.sent.lock().unwrap().get(email).cloned()
    }
}

#[async_trait]
impl MailerService for CapturingMailer {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<String, String> {
        self.sent
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        Ok(format!("msg-{}", uuid::Uuid::new_v4()))
    }

    fn is_valid_email(&self, email: &str) -> bool {
        rr_shared::utils::is_valid_email(email)
    }
}

struct Harness {
    auth_service: AuthService<MockUserRepository, CapturingMailer, MockVerificationCodeRepository>,
    mailer: Arc<CapturingMailer>,
    code_repository: Arc<MockVerificationCodeRepository>,
    session_service: Arc<SessionService>,
}

fn harness() -> Harness {
    let mailer = Arc::new(CapturingMailer::new());
    let code_repository = Arc::new(MockVerificationCodeRepository::new());
    let user_repository = Arc::new(MockUserRepository::new());
    let session_service = Arc::new(SessionService::new(SessionConfig {
        jwt_secret: "integration-test-secret".to_string(),
        ..Default::default()
    }));

    let verification_service = Arc::new(VerificationService::new(
        mailer.clone(),
        code_repository.clone(),
        VerificationServiceConfig::default(),
    ));

    let auth_service = AuthService::new(
        user_repository,
        verification_service,
        session_service.clone(),
        AuthServiceConfig::default(),
    );

    Harness {
        auth_service,
        mailer,
        code_repository,
        session_service,
    }
}

#[tokio::test]
async fn test_full_sign_in_lifecycle() {
    let h = harness();
    let email = "user@example.com";

    // Request a code: one record, six digits, expiry about ten minutes out
    h.auth_service.send_verification_code(email).await.unwrap();

    let record = h.code_repository.find(email).await.unwrap().unwrap();
    assert_eq!(record.code.len(), CODE_LENGTH);
    assert!(record.code.chars().all(|c| c.is_ascii_digit()));

    let ttl = record.expires_at - Utc::now();
    assert!(ttl > Duration::minutes(9));
    assert!(ttl <= Duration::minutes(10));

    // The mailed code is the stored code
    let mailed = h.mailer.last_code(email).unwrap();
    assert_eq!(mailed, record.code);

    // Verify within the window: session established, record consumed
    let response = h.auth_service.verify_code(email, &mailed).await.unwrap();
    assert!(response.is_new_user);
    assert!(h.code_repository.find(email).await.unwrap().is_none());

    let claims = h
        .session_service
        .verify_session(&response.access_token)
        .unwrap();
    assert_eq!(claims.email, email);

    // Submitting the same code again: nothing pending anymore
    let replay = h.auth_service.verify_code(email, &mailed).await;
    assert!(matches!(
        replay,
        Err(DomainError::Auth(AuthError::NoPendingCode))
    ));
}

#[tokio::test]
async fn test_rapid_resend_leaves_exactly_one_valid_code() {
    let h = harness();
    let email = "user@example.com";

    h.auth_service.send_verification_code(email).await.unwrap();
    let first = h.mailer.last_code(email).unwrap();
    h.auth_service.send_verification_code(email).await.unwrap();
    let second = h.mailer.last_code(email).unwrap();

    assert_eq!(h.code_repository.len().await, 1);

    // Exactly one of the two delivered codes verifies: the later one
    if first != second {
        let stale = h.auth_service.verify_code(email, &first).await;
        assert!(matches!(
            stale,
            Err(DomainError::Auth(AuthError::InvalidVerificationCode))
        ));
    }
    h.auth_service.verify_code(email, &second).await.unwrap();
}
