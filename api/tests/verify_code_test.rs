//! Handler tests for POST /api/v1/auth/verify-code

use std::sync::Arc;

use actix_web::{test, web};
use chrono::{Duration, Utc};
use serde_json::json;

use rr_api::app::create_app;
use rr_api::routes::auth::AppState;
use rr_core::domain::entities::verification_code::VerificationCode;
use rr_core::repositories::{
    MockUserRepository, MockVerificationCodeRepository, UserRepository, VerificationCodeRepository,
};
use rr_core::services::auth::{AuthService, AuthServiceConfig};
use rr_core::services::session::{SessionConfig, SessionService};
use rr_core::services::verification::{VerificationService, VerificationServiceConfig};
use rr_infra::mail::{MailerServiceAdapter, MockMailer};

type TestState =
    AppState<MockUserRepository, MailerServiceAdapter, MockVerificationCodeRepository>;

struct Fixture {
    state: web::Data<TestState>,
    code_repository: Arc<MockVerificationCodeRepository>,
    user_repository: Arc<MockUserRepository>,
}

fn fixture() -> Fixture {
    let code_repository = Arc::new(MockVerificationCodeRepository::new());
    let user_repository = Arc::new(MockUserRepository::new());

    let verification_service = Arc::new(VerificationService::new(
        Arc::new(MailerServiceAdapter::new(Arc::new(MockMailer::new()))),
        code_repository.clone(),
        VerificationServiceConfig::default(),
    ));
    let session_service = Arc::new(SessionService::new(SessionConfig {
        jwt_secret: "handler-test-secret".to_string(),
        ..Default::default()
    }));
    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        verification_service,
        session_service,
        AuthServiceConfig::default(),
    ));

    Fixture {
        state: web::Data::new(AppState { auth_service }),
        code_repository,
        user_repository,
    }
}

/// Seed a pending code directly in the store and return it
async fn seed_code(repository: &MockVerificationCodeRepository, email: &str) -> String {
    let record = VerificationCode::new(email.to_string());
    let code = record.code.clone();
    repository.insert_raw(record).await;
    code
}

#[actix_rt::test]
async fn test_verify_code_success_establishes_session() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone())).await;

    let code = seed_code(&f.code_repository, "user@example.com").await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "user@example.com", "code": code }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], json!("Bearer"));
    assert_eq!(body["is_new_user"], json!(true));

    // Account was created, code was consumed
    assert!(f
        .user_repository
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .is_some());
    assert!(f
        .code_repository
        .find("user@example.com")
        .await
        .unwrap()
        .is_none());
}

#[actix_rt::test]
async fn test_verify_code_is_single_use() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone())).await;

    let code = seed_code(&f.code_repository, "user@example.com").await;

    let first = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "user@example.com", "code": code.clone() }))
        .to_request();
    assert!(test::call_service(&app, first).await.status().is_success());

    // Replay: same code, now rejected with the generic message
    let replay = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "user@example.com", "code": code }))
        .to_request();
    let response = test::call_service(&app, replay).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"], json!("invalid_or_expired_code"));
}

#[actix_rt::test]
async fn test_wrong_code_does_not_consume_the_record() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone())).await;

    let correct = seed_code(&f.code_repository, "user@example.com").await;
    let wrong = if correct == "123456" { "654321" } else { "123456" };

    let bad = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "user@example.com", "code": wrong }))
        .to_request();
    let response = test::call_service(&app, bad).await;
    assert_eq!(response.status(), 400);

    // The pending record survived; the correct code still signs in
    let good = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "user@example.com", "code": correct }))
        .to_request();
    assert!(test::call_service(&app, good).await.status().is_success());
}

#[actix_rt::test]
async fn test_expired_code_gets_same_generic_message() {
    let f = fixture();
    let app = test::init_service(create_app(f.state.clone())).await;

    let mut stale = VerificationCode::new("user@example.com".to_string());
    stale.expires_at = Utc::now() - Duration::seconds(1);
    let code = stale.code.clone();
    f.code_repository.insert_raw(stale).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "user@example.com", "code": code }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"], json!("invalid_or_expired_code"));

    // The expired record is left in place for the next request to replace
    assert!(f
        .code_repository
        .find("user@example.com")
        .await
        .unwrap()
        .is_some());
}

#[actix_rt::test]
async fn test_verify_without_pending_code() {
    let f = fixture();
    let app = test::init_service(create_app(f.state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "nobody@example.com", "code": "123456" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["error"], json!("invalid_or_expired_code"));
}

#[actix_rt::test]
async fn test_verify_code_rejects_malformed_payload() {
    let f = fixture();
    let app = test::init_service(create_app(f.state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": "user@example.com", "code": "12345" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
}
