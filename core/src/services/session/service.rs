//! Session token issuance and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::config::SessionConfig;

/// Role carried in the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular signed-in member
    Member,
    /// Editorial/admin user (email on the configured admin list)
    Admin,
}

/// JWT claims for a ReelRoom session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id
    pub sub: String,
    /// Email the session is bound to
    pub email: String,
    /// Role resolved at issuance from the admin list
    pub role: UserRole,
    /// Issuer
    pub iss: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Token id
    pub jti: String,
}

/// An issued session token
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// Encoded JWT
    pub access_token: String,
    /// Seconds until expiry
    pub expires_in: i64,
}

/// Service that establishes authenticated sessions for verified users
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: SessionConfig,
}

impl SessionService {
    /// Creates a new session service from configuration
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;

        Self {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issue a session token bound to a verified user
    pub fn issue_session(&self, user: &User) -> DomainResult<SessionToken> {
        let now = Utc::now();
        let expires_in = Duration::minutes(self.config.token_ttl_minutes).num_seconds();

        let role = if self.config.is_admin(&user.email) {
            UserRole::Admin
        } else {
            UserRole::Member
        };

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role,
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + expires_in,
            jti: Uuid::new_v4().to_string(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to encode session token");
                DomainError::Auth(AuthError::TokenGenerationFailed)
            })?;

        Ok(SessionToken {
            access_token,
            expires_in,
        })
    }

    /// Validate a session token and return its claims
    pub fn verify_session(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Unauthorized)
    }
}
