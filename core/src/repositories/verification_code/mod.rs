//! Verification code repository interface and test double

mod mock;
mod repository;

pub use mock::MockVerificationCodeRepository;
pub use repository::VerificationCodeRepository;
