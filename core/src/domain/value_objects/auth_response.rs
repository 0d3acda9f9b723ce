//! Authentication response value object

use serde::{Deserialize, Serialize};

/// Result of a successful sign-in, handed back to the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT access token for the authenticated session
    pub access_token: String,

    /// Token type, always "Bearer"
    pub token_type: String,

    /// Seconds until the access token expires
    pub expires_in: i64,

    /// Whether the account was created by this sign-in
    pub is_new_user: bool,
}

impl AuthResponse {
    /// Creates an authentication response from an issued session token.
    pub fn new(access_token: String, expires_in: i64, is_new_user: bool) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            is_new_user,
        }
    }
}
