//! Repository interfaces for data persistence.
//!
//! Concrete implementations live in the infrastructure crate; the mocks
//! here back unit and handler tests.

pub mod user;
pub mod verification_code;

pub use user::{MockUserRepository, UserRepository};
pub use verification_code::{MockVerificationCodeRepository, VerificationCodeRepository};
