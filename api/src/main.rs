use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use rr_core::services::auth::{AuthService, AuthServiceConfig};
use rr_core::services::session::{SessionConfig, SessionService};
use rr_core::services::verification::{VerificationService, VerificationServiceConfig};
use rr_infra::database::{DatabasePool, MySqlUserRepository, MySqlVerificationCodeRepository};
use rr_infra::mail::create_mailer_service;
use rr_shared::config::{DatabaseConfig, MailConfig, ServerConfig};

use rr_api::app;
use rr_api::routes::auth::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting ReelRoom API server");

    // Load configuration
    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let mail_config = MailConfig::from_env();
    let session_config = SessionConfig::from_env();

    // Database pool and repositories
    let db = DatabasePool::new(&database_config).await?;
    db.health_check().await?;

    let user_repository = Arc::new(MySqlUserRepository::new(db.pool().clone()));
    let code_repository = Arc::new(MySqlVerificationCodeRepository::new(db.pool().clone()));

    // Mail provider
    let mailer = Arc::new(create_mailer_service(&mail_config));

    // Services
    let verification_service = Arc::new(VerificationService::new(
        mailer,
        code_repository,
        VerificationServiceConfig::default(),
    ));
    let session_service = Arc::new(SessionService::new(session_config));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        verification_service,
        session_service,
        AuthServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState { auth_service });

    let bind_address = server_config.bind_address();
    info!("Server listening on {}", bind_address);

    HttpServer::new(move || app::create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await?;

    Ok(())
}
