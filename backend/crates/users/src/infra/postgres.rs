//! PostgreSQL Repository Implementations

use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, FollowRepository, UserRepository};
use crate::domain::value_object::{handle::Handle, role::Role};
use crate::error::{UsersError, UsersResult};

/// Upper bound on any single store call
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a store future under the standard time budget
async fn bounded<T>(
    fut: impl Future<Output = Result<T, sqlx::Error>>,
) -> UsersResult<T> {
    match tokio::time::timeout(STORE_TIMEOUT, fut).await {
        Ok(result) => result.map_err(UsersError::from),
        Err(_) => Err(UsersError::Timeout),
    }
}

/// PostgreSQL-backed users repository
#[derive(Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUsersRepository {
    async fn create(&self, user: &User) -> UsersResult<()> {
        let result = bounded(
            sqlx::query(
                r#"
                INSERT INTO users (
                    user_id,
                    handle,
                    handle_canonical,
                    role,
                    points,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(user.user_id.as_uuid())
            .bind(user.handle.original())
            .bind(user.handle.canonical())
            .bind(user.role.id())
            .bind(user.points)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool),
        )
        .await;

        match result {
            Ok(_) => Ok(()),
            // Unique index on handle_canonical; two concurrent registrations
            // race past the exists check and one lands here.
            Err(UsersError::Database(e)) if is_unique_violation(&e) => {
                Err(UsersError::HandleTaken)
            }
            Err(e) => Err(e),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> UsersResult<Option<User>> {
        let row = bounded(
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT user_id, handle, handle_canonical, role, points, created_at, updated_at
                FROM users
                WHERE user_id = $1
                "#,
            )
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_handle(&self, handle: &Handle) -> UsersResult<Option<User>> {
        let row = bounded(
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT user_id, handle, handle_canonical, role, points, created_at, updated_at
                FROM users
                WHERE handle_canonical = $1
                "#,
            )
            .bind(handle.canonical())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_handle(&self, handle: &Handle) -> UsersResult<bool> {
        bounded(
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE handle_canonical = $1)",
            )
            .bind(handle.canonical())
            .fetch_one(&self.pool),
        )
        .await
    }

    async fn update(&self, user: &User) -> UsersResult<()> {
        let result = bounded(
            sqlx::query(
                r#"
                UPDATE users SET
                    handle = $2,
                    handle_canonical = $3,
                    updated_at = $4
                WHERE user_id = $1
                "#,
            )
            .bind(user.user_id.as_uuid())
            .bind(user.handle.original())
            .bind(user.handle.canonical())
            .bind(user.updated_at)
            .execute(&self.pool),
        )
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(UsersError::Database(e)) if is_unique_violation(&e) => {
                Err(UsersError::HandleTaken)
            }
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgUsersRepository {
    async fn create(&self, credential: &Credential) -> UsersResult<()> {
        bounded(
            sqlx::query(
                r#"
                INSERT INTO credentials (
                    user_id,
                    password_hash,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(credential.user_id.as_uuid())
            .bind(credential.password_hash.as_phc_string())
            .bind(credential.created_at)
            .bind(credential.updated_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> UsersResult<Option<Credential>> {
        let row = bounded(
            sqlx::query_as::<_, CredentialRow>(
                r#"
                SELECT user_id, password_hash, created_at, updated_at
                FROM credentials
                WHERE user_id = $1
                "#,
            )
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }
}

// ============================================================================
// Follow Repository Implementation
// ============================================================================

impl FollowRepository for PgUsersRepository {
    async fn follow(&self, follower_id: &UserId, followee_id: &UserId) -> UsersResult<bool> {
        let result = bounded(
            sqlx::query(
                r#"
                INSERT INTO follows (follower_id, followee_id, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (follower_id, followee_id) DO NOTHING
                "#,
            )
            .bind(follower_id.as_uuid())
            .bind(followee_id.as_uuid())
            .bind(Utc::now())
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unfollow(&self, follower_id: &UserId, followee_id: &UserId) -> UsersResult<bool> {
        let result = bounded(
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
                .bind(follower_id.as_uuid())
                .bind(followee_id.as_uuid())
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn following_of(&self, user_id: &UserId) -> UsersResult<Vec<User>> {
        let rows = bounded(
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT u.user_id, u.handle, u.handle_canonical, u.role, u.points,
                       u.created_at, u.updated_at
                FROM users u
                JOIN follows f ON f.followee_id = u.user_id
                WHERE f.follower_id = $1
                ORDER BY u.handle_canonical
                "#,
            )
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn followers_of(&self, user_id: &UserId) -> UsersResult<Vec<User>> {
        let rows = bounded(
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT u.user_id, u.handle, u.handle_canonical, u.role, u.points,
                       u.created_at, u.updated_at
                FROM users u
                JOIN follows f ON f.follower_id = u.user_id
                WHERE f.followee_id = $1
                ORDER BY u.handle_canonical
                "#,
            )
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    handle: String,
    #[allow(dead_code)]
    handle_canonical: String,
    role: i16,
    points: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> UsersResult<User> {
        let role = Role::from_id(self.role)
            .ok_or_else(|| UsersError::Internal(format!("Invalid role id in store: {}", self.role)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            handle: Handle::from_db(&self.handle),
            role,
            points: self.points,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> UsersResult<Credential> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| UsersError::Internal(e.to_string()))?;

        Ok(Credential {
            user_id: UserId::from_uuid(self.user_id),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// PostgreSQL unique violation (error code 23505)
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
