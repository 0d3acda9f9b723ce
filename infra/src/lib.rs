//! # Infrastructure Layer
//!
//! Concrete implementations of the seams the core crate defines:
//! - **Database**: MySQL repositories using SQLx
//! - **Mail**: transactional mail delivery (HTTP provider and a mock)
//!
//! Everything here maps its own failures into either [`InfraError`] for
//! infrastructure-internal call sites or the core's `DomainError` at the
//! repository/service boundaries.

use thiserror::Error;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Mail module - transactional mail providers
pub mod mail;

/// Infrastructure error type
#[derive(Error, Debug)]
pub enum InfraError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail service error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
