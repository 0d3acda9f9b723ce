//! Session issuance module
//!
//! Issues JWT access tokens after a successful code verification. The
//! admin email list is an explicit configuration value injected at
//! startup; there is no ambient admin state.

mod config;
mod service;

pub use config::SessionConfig;
pub use service::{Claims, SessionService, SessionToken, UserRole};
