//! Configuration modules for the ReelRoom backend services

pub mod database;
pub mod environment;
pub mod mail;
pub mod server;

pub use database::DatabaseConfig;
pub use environment::Environment;
pub use mail::MailConfig;
pub use server::ServerConfig;
