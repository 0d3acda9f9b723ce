//! User entity representing a registered ReelRoom account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// Accounts are keyed by email address and created automatically the first
/// time an email completes code verification. There is no password; the
/// verification flow is the only first-party sign-in path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address (unique per account)
    pub email: String,

    /// Public display name shown on reviews and comments
    pub display_name: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Whether the account is blocked (e.g. banned from commenting)
    pub is_blocked: bool,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            is_blocked: false,
        }
    }

    /// Sets the display name
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = Some(name.into());
        self.updated_at = Utc::now();
    }

    /// Blocks the user account
    pub fn block(&mut self) {
        self.is_blocked = true;
        self.updated_at = Utc::now();
    }

    /// Unblocks the user account
    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}
