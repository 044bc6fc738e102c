//! User Entity
//!
//! Core user profile entity containing non-sensitive user data.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{handle::Handle, role::Role};

/// User entity
///
/// Contains public user profile information.
/// Sensitive auth data is in the Credential entity.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Handle (unique, for login and display)
    pub handle: Handle,
    /// Role (Designer or Player), fixed at registration
    pub role: Role,
    /// Accumulated score; mutated only by answer scoring
    pub points: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with zero points
    pub fn new(handle: Handle, role: Role) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            handle,
            role,
            points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the handle
    pub fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
        self.updated_at = Utc::now();
    }
}
