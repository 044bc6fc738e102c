//! HTTP Handlers

use axum::Extension;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::UserId;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    FollowUseCase, ListFollowsUseCase, LoginInput, LoginUseCase, ProfileUseCase, RegisterInput,
    RegisterUseCase, UpdateProfileInput,
};
use crate::domain::repository::{CredentialRepository, FollowRepository, UserRepository};
use crate::domain::value_object::role::Role;
use crate::error::UsersResult;
use crate::presentation::dto::{
    FollowListResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    UpdateProfileRequest, UserSummary,
};
use crate::presentation::middleware::AuthUser;

/// Shared state for users handlers
#[derive(Clone)]
pub struct UsersAppState<R>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<UsersAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> UsersResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        RegisterUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            handle: req.handle,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
            handle: output.handle,
            role: output.role.code().to_string(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<UsersAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> UsersResult<Json<LoginResponse>>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            handle: req.handle,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        user: UserSummary {
            id: output.user_id,
            handle: output.handle,
            role: output.role.code().to_string(),
            points: output.points,
        },
    }))
}

// ============================================================================
// Profiles
// ============================================================================

/// GET /api/users/profile
pub async fn get_profile<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
) -> UsersResult<Json<UserSummary>>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.get(&auth.user_id).await?;
    Ok(Json(UserSummary::from(&user)))
}

/// PUT /api/users/profile
pub async fn update_profile<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> UsersResult<Json<UserSummary>>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case
        .update(&auth.user_id, UpdateProfileInput { handle: req.handle })
        .await?;
    Ok(Json(UserSummary::from(&user)))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<UsersAppState<R>>,
    Path(id): Path<Uuid>,
) -> UsersResult<Json<UserSummary>>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.get(&UserId::from_uuid(id)).await?;
    Ok(Json(UserSummary::from(&user)))
}

// ============================================================================
// Follow graph
// ============================================================================

/// GET /api/users/following
pub async fn following<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
) -> UsersResult<Json<FollowListResponse>>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListFollowsUseCase::new(state.repo.clone());
    let users = use_case.following(&auth.user_id).await?;
    Ok(Json(FollowListResponse {
        users: users.iter().map(UserSummary::from).collect(),
    }))
}

/// GET /api/users/followers
pub async fn followers<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
) -> UsersResult<Json<FollowListResponse>>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListFollowsUseCase::new(state.repo.clone());
    let users = use_case.followers(&auth.user_id).await?;
    Ok(Json(FollowListResponse {
        users: users.iter().map(UserSummary::from).collect(),
    }))
}

/// POST /api/player/follow/designer/{id}
pub async fn follow_designer<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = FollowUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .follow(&auth.user_id, &UserId::from_uuid(id), Role::Designer)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/player/unfollow/designer/{id}
/// (also DELETE /api/player/follow/designer/{id})
pub async fn unfollow_designer<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = FollowUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .unfollow(&auth.user_id, &UserId::from_uuid(id), Role::Designer)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/player/follow/player/{id}
pub async fn follow_player<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = FollowUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .follow(&auth.user_id, &UserId::from_uuid(id), Role::Player)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/player/unfollow/player/{id}
/// (also DELETE /api/player/follow/player/{id})
pub async fn unfollow_player<R>(
    State(state): State<UsersAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let use_case = FollowUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .unfollow(&auth.user_id, &UserId::from_uuid(id), Role::Player)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
