//! Player Question Listing Use Case
//!
//! Lists questions the player has not answered yet, filtered by category
//! name and difficulty, capped at the configured page size.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::QuizConfig;
use crate::domain::repository::{CategoryRepository, PlayRepository, QuestionWithCategory};
use crate::domain::value_object::difficulty::Difficulty;
use crate::error::{QuizError, QuizResult};

/// Query filters for the player listing
#[derive(Debug, Clone, Default)]
pub struct ListQuestionsFilter {
    /// Exact category name
    pub category: Option<String>,
    /// Difficulty level, validated against 1..=5
    pub difficulty: Option<i16>,
}

/// Player question listing use case
pub struct ListQuestionsUseCase<P, C>
where
    P: PlayRepository,
    C: CategoryRepository,
{
    play_repo: Arc<P>,
    category_repo: Arc<C>,
    config: Arc<QuizConfig>,
}

impl<P, C> ListQuestionsUseCase<P, C>
where
    P: PlayRepository,
    C: CategoryRepository,
{
    pub fn new(play_repo: Arc<P>, category_repo: Arc<C>, config: Arc<QuizConfig>) -> Self {
        Self {
            play_repo,
            category_repo,
            config,
        }
    }

    /// List unanswered questions for `player_id`
    ///
    /// A category filter naming no category is an error, not an empty
    /// result, so typos surface to the caller.
    pub async fn list(
        &self,
        player_id: &UserId,
        filter: ListQuestionsFilter,
    ) -> QuizResult<Vec<QuestionWithCategory>> {
        let category_id = match filter.category {
            Some(name) => {
                let category = self
                    .category_repo
                    .find_by_name(&name)
                    .await?
                    .ok_or(QuizError::CategoryNotFound)?;
                Some(category.category_id)
            }
            None => None,
        };

        let difficulty = filter.difficulty.map(Difficulty::new).transpose()?;

        self.play_repo
            .candidates(
                player_id,
                category_id.as_ref(),
                difficulty,
                Some(self.config.page_size),
            )
            .await
    }
}
