//! Handler tests for POST /api/v1/auth/send-code
//!
//! Runs the real handlers against in-memory repositories and the mock
//! mail provider.

use std::sync::Arc;

use actix_web::{test, web};
use serde_json::json;

use rr_api::app::create_app;
use rr_api::routes::auth::AppState;
use rr_core::repositories::{
    MockUserRepository, MockVerificationCodeRepository, VerificationCodeRepository,
};
use rr_core::services::auth::{AuthService, AuthServiceConfig};
use rr_core::services::session::{SessionConfig, SessionService};
use rr_core::services::verification::{VerificationService, VerificationServiceConfig};
use rr_infra::mail::{MailerServiceAdapter, MockMailer};

type TestState =
    AppState<MockUserRepository, MailerServiceAdapter, MockVerificationCodeRepository>;

fn test_state(mailer: MockMailer) -> (web::Data<TestState>, Arc<MockVerificationCodeRepository>) {
    let code_repository = Arc::new(MockVerificationCodeRepository::new());
    let user_repository = Arc::new(MockUserRepository::new());

    let verification_service = Arc::new(VerificationService::new(
        Arc::new(MailerServiceAdapter::new(Arc::new(mailer))),
        code_repository.clone(),
        VerificationServiceConfig::default(),
    ));
    let session_service = Arc::new(SessionService::new(SessionConfig {
        jwt_secret: "handler-test-secret".to_string(),
        ..Default::default()
    }));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        verification_service,
        session_service,
        AuthServiceConfig::default(),
    ));

    (
        web::Data::new(AppState { auth_service }),
        code_repository,
    )
}

#[actix_rt::test]
async fn test_send_code_success() {
    let (state, code_repository) = test_state(MockMailer::new());
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "email": "user@example.com" }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["success"], json!(true));
    assert!(body["data"]["message"].as_str().unwrap().contains("code"));

    // A record was persisted for the address
    let stored = code_repository.find("user@example.com").await.unwrap();
    assert!(stored.is_some());
    assert_eq!(stored.unwrap().code.len(), 6);
}

#[actix_rt::test]
async fn test_send_code_rejects_address_without_at_sign() {
    let (state, code_repository) = test_state(MockMailer::new());
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);

    // Validation failure performs no side effects
    assert!(code_repository.find("not-an-email").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_send_code_rejects_missing_field() {
    let (state, _) = test_state(MockMailer::new());
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({}))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn test_send_code_delivery_failure_reports_error_but_keeps_code() {
    let (state, code_repository) = test_state(MockMailer::failing());
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "email": "user@example.com" }))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 503);

    // The code was persisted before the delivery attempt
    assert!(code_repository.find("user@example.com").await.unwrap().is_some());
}

#[actix_rt::test]
async fn test_resend_replaces_previous_code() {
    let (state, code_repository) = test_state(MockMailer::new());
    let app = test::init_service(create_app(state)).await;

    for _ in 0..3 {
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .set_json(json!({ "email": "user@example.com" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert!(response.status().is_success());
    }

    assert_eq!(code_repository.len().await, 1);
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let (state, _) = test_state(MockMailer::new());
    let app = test::init_service(create_app(state)).await;

    let request = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["status"], json!("healthy"));
}
