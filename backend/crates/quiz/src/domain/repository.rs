//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CategoryId, QuestionId, UserId};

use crate::domain::entity::{category::Category, question::Question};
use crate::domain::value_object::difficulty::Difficulty;
use crate::error::QuizResult;

/// A question joined with its category name, as players see it
#[derive(Debug, Clone)]
pub struct QuestionWithCategory {
    pub question: Question,
    pub category_name: Option<String>,
}

/// Leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub handle: String,
    pub points: i64,
}

/// Question repository trait
#[trait_variant::make(QuestionRepository: Send)]
pub trait LocalQuestionRepository {
    /// Create a new question
    async fn create(&self, question: &Question) -> QuizResult<()>;

    /// Find question by ID, with its category name
    async fn find_by_id(&self, question_id: &QuestionId) -> QuizResult<Option<QuestionWithCategory>>;

    /// Questions authored by `creator_id`
    async fn list_by_creator(&self, creator_id: &UserId) -> QuizResult<Vec<QuestionWithCategory>>;

    /// Update question fields (not the relation set)
    async fn update(&self, question: &Question) -> QuizResult<()>;

    /// Delete a question. Returns false if it did not exist.
    async fn delete(&self, question_id: &QuestionId) -> QuizResult<bool>;

    /// Insert a relation edge. Returns false if it already existed.
    async fn link_related(
        &self,
        question_id: &QuestionId,
        related_id: &QuestionId,
    ) -> QuizResult<bool>;

    /// Delete a relation edge. Returns false if it did not exist.
    async fn unlink_related(
        &self,
        question_id: &QuestionId,
        related_id: &QuestionId,
    ) -> QuizResult<bool>;
}

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// Create a new category
    async fn create(&self, category: &Category) -> QuizResult<()>;

    /// Find category by ID
    async fn find_by_id(&self, category_id: &CategoryId) -> QuizResult<Option<Category>>;

    /// Find category by exact name
    async fn find_by_name(&self, name: &str) -> QuizResult<Option<Category>>;

    /// Categories authored by `creator_id`
    async fn list_by_creator(&self, creator_id: &UserId) -> QuizResult<Vec<Category>>;

    /// Update category fields
    async fn update(&self, category: &Category) -> QuizResult<()>;

    /// Delete a category. Returns false if it did not exist.
    async fn delete(&self, category_id: &CategoryId) -> QuizResult<bool>;
}

/// Play-side repository trait
///
/// Read and scoring paths players hit. `record_answer` is the
/// at-most-once gate: the answer row and the points increment commit
/// together or not at all.
#[trait_variant::make(PlayRepository: Send)]
pub trait LocalPlayRepository {
    /// Questions `player_id` has not answered yet, optionally filtered
    /// by category and difficulty. `limit` of None means no cap.
    async fn candidates(
        &self,
        player_id: &UserId,
        category_id: Option<&CategoryId>,
        difficulty: Option<Difficulty>,
        limit: Option<i64>,
    ) -> QuizResult<Vec<QuestionWithCategory>>;

    /// Record an answer and award `points` atomically.
    /// Returns false if the player already answered this question.
    async fn record_answer(
        &self,
        player_id: &UserId,
        question_id: &QuestionId,
        was_correct: bool,
        points: i64,
    ) -> QuizResult<bool>;

    /// Top players by points, deterministic order
    async fn top_players(&self, limit: i64) -> QuizResult<Vec<LeaderboardEntry>>;
}
