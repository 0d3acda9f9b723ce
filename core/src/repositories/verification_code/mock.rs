//! In-memory implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::repository::VerificationCodeRepository;

/// Mock verification code repository backed by a HashMap
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<HashMap<String, VerificationCode>>>,
    should_fail: bool,
}

impl MockVerificationCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a mock repository whose every operation fails, for testing
    /// store-unavailable paths
    pub fn failing() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            should_fail: true,
        }
    }

    /// Insert a record directly, bypassing `replace`.
    ///
    /// Lets tests place a record with an arbitrary expiry without racing
    /// the clock.
    pub async fn insert_raw(&self, code: VerificationCode) {
        self.codes.write().await.insert(code.email.clone(), code);
    }

    /// Number of stored records (including expired ones)
    pub async fn len(&self) -> usize {
        self.codes.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.codes.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "verification code store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn replace(&self, code: VerificationCode) -> Result<(), DomainError> {
        self.check_available()?;
        // Single map entry per email, so insert is the delete-then-insert
        self.codes.write().await.insert(code.email.clone(), code);
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<VerificationCode>, DomainError> {
        self.check_available()?;
        Ok(self.codes.read().await.get(email).cloned())
    }

    async fn remove(&self, email: &str) -> Result<(), DomainError> {
        self.check_available()?;
        self.codes.write().await.remove(email);
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut codes = self.codes.write().await;
        let before = codes.len();
        let now = Utc::now();
        codes.retain(|_, code| code.expires_at >= now);
        Ok((before - codes.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_replace_keeps_single_record_per_email() {
        let repo = MockVerificationCodeRepository::new();

        let first = VerificationCode::new("reviewer@example.com".to_string());
        let second = VerificationCode::new("reviewer@example.com".to_string());
        let second_code = second.code.clone();

        repo.replace(first).await.unwrap();
        repo.replace(second).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let found = repo.find("reviewer@example.com").await.unwrap().unwrap();
        assert_eq!(found.code, second_code);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = MockVerificationCodeRepository::new();
        repo.replace(VerificationCode::new("reviewer@example.com".to_string()))
            .await
            .unwrap();

        repo.remove("reviewer@example.com").await.unwrap();
        assert!(repo.find("reviewer@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_returns_expired_records() {
        let repo = MockVerificationCodeRepository::new();
        let mut code = VerificationCode::new("reviewer@example.com".to_string());
        code.expires_at = Utc::now() - Duration::seconds(5);
        repo.insert_raw(code).await;

        // Expired rows are still visible; expiry is the verifier's call
        assert!(repo.find("reviewer@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let repo = MockVerificationCodeRepository::new();

        let mut stale = VerificationCode::new("stale@example.com".to_string());
        stale.expires_at = Utc::now() - Duration::minutes(1);
        repo.insert_raw(stale).await;
        repo.replace(VerificationCode::new("fresh@example.com".to_string()))
            .await
            .unwrap();

        let deleted = repo.delete_expired().await.unwrap();
        assert_eq!(deleted, 1);
        assert!(repo.find("stale@example.com").await.unwrap().is_none());
        assert!(repo.find("fresh@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failing_repository() {
        let repo = MockVerificationCodeRepository::failing();
        let result = repo.find("reviewer@example.com").await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
