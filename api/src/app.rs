//! Application factory
//!
//! Builds the Actix-web application with middleware, routes, and shared
//! state. Generic over the repository and mailer seams so tests can run
//! the real handlers against in-memory implementations.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use rr_core::repositories::{UserRepository, VerificationCodeRepository};
use rr_core::services::verification::MailerService;

use crate::middleware::cors::create_cors;
use crate::routes::auth::{send_code::send_code, verify_code::verify_code, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, M, R>(
    app_state: web::Data<AppState<U, M, R>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    M: MailerService + 'static,
    R: VerificationCodeRepository + 'static,
{
    let cors = create_cors();

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/send-code", web::post().to(send_code::<U, M, R>))
                    .route("/verify-code", web::post().to(verify_code::<U, M, R>)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "reelroom-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
