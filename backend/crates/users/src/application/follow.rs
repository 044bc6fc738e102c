//! Follow Use Cases
//!
//! Follow/unfollow edges and the two projections of the graph.
//! An edge is one relation row, so "A follows B" and "B is followed by A"
//! cannot disagree; insert and delete are single atomic operations.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::{FollowRepository, UserRepository};
use crate::domain::value_object::role::Role;
use crate::error::{UsersError, UsersResult};

/// Follow/unfollow use case
pub struct FollowUseCase<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    user_repo: Arc<U>,
    follow_repo: Arc<F>,
}

impl<U, F> FollowUseCase<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    pub fn new(user_repo: Arc<U>, follow_repo: Arc<F>) -> Self {
        Self {
            user_repo,
            follow_repo,
        }
    }

    /// Follow a target expected to hold `target_role`
    ///
    /// A missing target and a role mismatch are indistinguishable to the
    /// caller; both report "{Role} not found". Idempotent.
    pub async fn follow(
        &self,
        actor_id: &UserId,
        target_id: &UserId,
        target_role: Role,
    ) -> UsersResult<()> {
        if actor_id.as_uuid() == target_id.as_uuid() {
            return Err(UsersError::SelfFollow);
        }

        let target = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .filter(|u| u.role == target_role)
            .ok_or(UsersError::UserNotFound(target_role.label()))?;

        let inserted = self.follow_repo.follow(actor_id, target_id).await?;
        if inserted {
            tracing::info!(
                follower = %actor_id,
                followee = %target.user_id,
                "Follow edge created"
            );
        }

        Ok(())
    }

    /// Remove a follow edge. Idempotent; missing targets still 404.
    pub async fn unfollow(
        &self,
        actor_id: &UserId,
        target_id: &UserId,
        target_role: Role,
    ) -> UsersResult<()> {
        if actor_id.as_uuid() == target_id.as_uuid() {
            return Err(UsersError::SelfFollow);
        }

        self.user_repo
            .find_by_id(target_id)
            .await?
            .filter(|u| u.role == target_role)
            .ok_or(UsersError::UserNotFound(target_role.label()))?;

        let removed = self.follow_repo.unfollow(actor_id, target_id).await?;
        if removed {
            tracing::info!(
                follower = %actor_id,
                followee = %target_id,
                "Follow edge removed"
            );
        }

        Ok(())
    }
}

/// Projection use case for the follow graph
pub struct ListFollowsUseCase<F>
where
    F: FollowRepository,
{
    follow_repo: Arc<F>,
}

impl<F> ListFollowsUseCase<F>
where
    F: FollowRepository,
{
    pub fn new(follow_repo: Arc<F>) -> Self {
        Self { follow_repo }
    }

    /// Users the given user follows
    pub async fn following(&self, user_id: &UserId) -> UsersResult<Vec<User>> {
        self.follow_repo.following_of(user_id).await
    }

    /// Users following the given user
    pub async fn followers(&self, user_id: &UserId) -> UsersResult<Vec<User>> {
        self.follow_repo.followers_of(user_id).await
    }
}
