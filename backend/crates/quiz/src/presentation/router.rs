//! Quiz Routers

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use users::config::AuthConfig;
use users::middleware::{require_auth, require_designer, require_player};

use crate::application::config::QuizConfig;
use crate::domain::repository::{CategoryRepository, PlayRepository, QuestionRepository};
use crate::infra::postgres::PgQuizRepository;
use crate::presentation::handlers::{self, QuizAppState};

/// Create the designer router (authoring) with PostgreSQL repository
pub fn designer_router(
    repo: PgQuizRepository,
    quiz_config: QuizConfig,
    auth_config: AuthConfig,
) -> Router {
    designer_router_generic(repo, quiz_config, auth_config)
}

/// Create a generic designer router for any repository implementation
///
/// Designer-gated; merged under `/api/designer` by the binary.
pub fn designer_router_generic<R>(
    repo: R,
    quiz_config: QuizConfig,
    auth_config: AuthConfig,
) -> Router
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let state = QuizAppState {
        repo: Arc::new(repo),
        config: Arc::new(quiz_config),
    };

    Router::new()
        .route(
            "/questions",
            get(handlers::list_questions::<R>).post(handlers::create_question::<R>),
        )
        .route(
            "/questions/{id}",
            get(handlers::get_question::<R>)
                .put(handlers::update_question::<R>)
                .delete(handlers::delete_question::<R>),
        )
        .route(
            "/questions/{id}/related/{relatedId}",
            post(handlers::link_related::<R>).delete(handlers::unlink_related::<R>),
        )
        .route(
            "/categories",
            get(handlers::list_categories::<R>).post(handlers::create_category::<R>),
        )
        .route(
            "/categories/{id}",
            get(handlers::get_category::<R>)
                .put(handlers::update_category::<R>)
                .delete(handlers::delete_category::<R>),
        )
        // Layers run outermost-last: require_auth first, then the role gate
        .route_layer(axum_middleware::from_fn(require_designer))
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::new(auth_config),
            require_auth,
        ))
        .with_state(state)
}

/// Create the player router (play + leaderboard) with PostgreSQL repository
pub fn player_router(
    repo: PgQuizRepository,
    quiz_config: QuizConfig,
    auth_config: AuthConfig,
) -> Router {
    player_router_generic(repo, quiz_config, auth_config)
}

/// Create a generic player router for any repository implementation
///
/// Player-gated; merged under `/api/player` by the binary.
pub fn player_router_generic<R>(repo: R, quiz_config: QuizConfig, auth_config: AuthConfig) -> Router
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let state = QuizAppState {
        repo: Arc::new(repo),
        config: Arc::new(quiz_config),
    };

    Router::new()
        .route("/questions", get(handlers::player_questions::<R>))
        .route("/questions/random", get(handlers::random_question::<R>))
        .route("/questions/{id}/answer", post(handlers::submit_answer::<R>))
        .route("/leaderboard", get(handlers::leaderboard::<R>))
        // Layers run outermost-last: require_auth first, then the role gate
        .route_layer(axum_middleware::from_fn(require_player))
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::new(auth_config),
            require_auth,
        ))
        .with_state(state)
}
