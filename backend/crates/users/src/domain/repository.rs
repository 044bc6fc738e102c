//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::value_object::handle::Handle;
use crate::error::UsersResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> UsersResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> UsersResult<Option<User>>;

    /// Find user by handle (canonical form)
    async fn find_by_handle(&self, handle: &Handle) -> UsersResult<Option<User>>;

    /// Check if a handle exists
    async fn exists_by_handle(&self, handle: &Handle) -> UsersResult<bool>;

    /// Update user profile fields
    async fn update(&self, user: &User) -> UsersResult<()>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Create a credential
    async fn create(&self, credential: &Credential) -> UsersResult<()>;

    /// Find credential by user ID
    async fn find_by_user_id(&self, user_id: &UserId) -> UsersResult<Option<Credential>>;
}

/// Follow graph repository trait
///
/// One relation row per edge; both directions are projections of it.
#[trait_variant::make(FollowRepository: Send)]
pub trait LocalFollowRepository {
    /// Insert a follow edge. Returns false if it already existed.
    async fn follow(&self, follower_id: &UserId, followee_id: &UserId) -> UsersResult<bool>;

    /// Delete a follow edge. Returns false if it did not exist.
    async fn unfollow(&self, follower_id: &UserId, followee_id: &UserId) -> UsersResult<bool>;

    /// Users that `user_id` follows
    async fn following_of(&self, user_id: &UserId) -> UsersResult<Vec<User>>;

    /// Users that follow `user_id`
    async fn followers_of(&self, user_id: &UserId) -> UsersResult<Vec<User>>;
}
