//! Quiz Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Designer authoring: questions, categories, related-question links
//! - Player query engine: filtered listing and uniform random pick
//! - Answer submission with race-safe at-most-once scoring
//! - Leaderboard (top players by points, deterministic order)
//!
//! ## Scoring Model
//! - A correct answer earns `10 * difficulty` points
//! - Each question scores at most once per player, enforced by the store

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

mod tests;

// Re-exports for convenience
pub use application::config::QuizConfig;
pub use error::{QuizError, QuizResult};
pub use infra::postgres::PgQuizRepository;
pub use presentation::router::{designer_router, player_router};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
