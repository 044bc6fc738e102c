//! Profile Use Case
//!
//! Reads and updates the authenticated user's profile.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::handle::Handle;
use crate::error::{UsersError, UsersResult};

/// Profile update input (handle change only; role is immutable)
pub struct UpdateProfileInput {
    pub handle: String,
}

/// Profile use case
pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Fetch a profile by id
    pub async fn get(&self, user_id: &UserId) -> UsersResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UsersError::UserNotFound("User"))
    }

    /// Change the handle of the authenticated user
    pub async fn update(&self, user_id: &UserId, input: UpdateProfileInput) -> UsersResult<User> {
        let handle =
            Handle::new(&input.handle).map_err(|e| UsersError::InvalidHandle(e.to_string()))?;

        let mut user = self.get(user_id).await?;

        // No-op rename keeps the same canonical form and skips the
        // uniqueness check (which would see the user's own row).
        if user.handle.canonical() != handle.canonical()
            && self.user_repo.exists_by_handle(&handle).await?
        {
            return Err(UsersError::HandleTaken);
        }

        user.set_handle(handle);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, handle = %user.handle, "Profile updated");

        Ok(user)
    }
}
