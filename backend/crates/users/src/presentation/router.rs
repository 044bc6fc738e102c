//! Users Routers

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialRepository, FollowRepository, UserRepository};
use crate::infra::postgres::PgUsersRepository;
use crate::presentation::handlers::{self, UsersAppState};
use crate::presentation::middleware::{require_auth, require_player};

/// Create the auth router (register/login) with PostgreSQL repository
pub fn auth_router(repo: PgUsersRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let state = UsersAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}

/// Create the users router (profiles + follow projections) with PostgreSQL
pub fn users_router(repo: PgUsersRepository, config: AuthConfig) -> Router {
    users_router_generic(repo, config)
}

/// Create a generic users router for any repository implementation
///
/// All routes require a valid bearer token; any role may call them.
pub fn users_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let state = UsersAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/profile",
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        )
        .route("/following", get(handlers::following::<R>))
        .route("/followers", get(handlers::followers::<R>))
        .route("/{id}", get(handlers::get_user::<R>))
        .route_layer(axum_middleware::from_fn_with_state(
            state.config.clone(),
            require_auth,
        ))
        .with_state(state)
}

/// Create the follow router (player actions) with PostgreSQL
pub fn follow_router(repo: PgUsersRepository, config: AuthConfig) -> Router {
    follow_router_generic(repo, config)
}

/// Create a generic follow router for any repository implementation
///
/// Player-gated; merged under `/api/player` by the binary.
pub fn follow_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + CredentialRepository + FollowRepository + Clone + Send + Sync + 'static,
{
    let state = UsersAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/follow/designer/{id}",
            post(handlers::follow_designer::<R>).delete(handlers::unfollow_designer::<R>),
        )
        .route(
            "/follow/player/{id}",
            post(handlers::follow_player::<R>).delete(handlers::unfollow_player::<R>),
        )
        // Unfollow is a POST action; DELETE on /follow is kept as an alias
        .route(
            "/unfollow/designer/{id}",
            post(handlers::unfollow_designer::<R>),
        )
        .route("/unfollow/player/{id}", post(handlers::unfollow_player::<R>))
        // Layers run outermost-last: require_auth first, then the role gate
        .route_layer(axum_middleware::from_fn(require_player))
        .route_layer(axum_middleware::from_fn_with_state(
            state.config.clone(),
            require_auth,
        ))
        .with_state(state)
}
