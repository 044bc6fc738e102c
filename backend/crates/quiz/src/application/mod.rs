//! Application Layer
//!
//! Use cases orchestrating domain logic and repositories.

pub mod authoring;
pub mod categories;
pub mod config;
pub mod leaderboard;
pub mod list_questions;
pub mod random_question;
pub mod submit_answer;

pub use authoring::{AuthoringUseCase, CreateQuestionInput, UpdateQuestionInput};
pub use categories::CategoriesUseCase;
pub use leaderboard::LeaderboardUseCase;
pub use list_questions::{ListQuestionsFilter, ListQuestionsUseCase};
pub use random_question::RandomQuestionUseCase;
pub use submit_answer::{SubmitAnswerOutput, SubmitAnswerUseCase};
