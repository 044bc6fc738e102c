//! Credential Entity
//!
//! Sensitive authentication data, kept apart from the public profile.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

/// Stored login credential for a user
#[derive(Debug, Clone)]
pub struct Credential {
    /// Owning user
    pub user_id: UserId,
    /// Argon2id hash in PHC string format
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential for a user
    pub fn new(user_id: UserId, password_hash: HashedPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
