//! Question Entity

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, QuestionId, UserId};

use crate::domain::value_object::difficulty::Difficulty;
use crate::error::QuizError;

/// Quiz question
///
/// The options list and the correct-answer index are validated together
/// at every write, so a stored question can always be answered.
#[derive(Debug, Clone)]
pub struct Question {
    pub question_id: QuestionId,
    /// Question text shown to players
    pub text: String,
    /// Answer options (non-empty)
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
    /// Optional category; cleared when the category is deleted
    pub category_id: Option<CategoryId>,
    pub difficulty: Difficulty,
    /// Authoring designer; fixed at creation
    pub creator_id: UserId,
    /// Ids of related questions (set semantics)
    pub related_ids: Vec<QuestionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Create a new question, validating options and the answer index
    pub fn new(
        text: String,
        options: Vec<String>,
        correct_answer: usize,
        category_id: Option<CategoryId>,
        difficulty: Difficulty,
        creator_id: UserId,
    ) -> Result<Self, QuizError> {
        Self::validate_answer_bounds(&options, correct_answer)?;

        let now = Utc::now();
        Ok(Self {
            question_id: QuestionId::new(),
            text,
            options,
            correct_answer,
            category_id,
            difficulty,
            creator_id,
            related_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Check that `correct_answer` indexes into `options`
    pub fn validate_answer_bounds(
        options: &[String],
        correct_answer: usize,
    ) -> Result<(), QuizError> {
        if options.is_empty() {
            return Err(QuizError::EmptyOptions);
        }
        if correct_answer >= options.len() {
            return Err(QuizError::InvalidCorrectAnswer {
                index: correct_answer,
                len: options.len(),
            });
        }
        Ok(())
    }

    /// True if the submitted index is the correct one
    #[inline]
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }
}
