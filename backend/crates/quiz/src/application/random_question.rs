//! Random Question Use Case
//!
//! Uniform pick over the player's unanswered questions. Generic over the
//! RNG so tests can seed it.

use std::sync::Arc;

use kernel::id::UserId;
use rand::Rng;

use crate::domain::repository::{PlayRepository, QuestionWithCategory};
use crate::error::{QuizError, QuizResult};

/// Random question use case
pub struct RandomQuestionUseCase<P>
where
    P: PlayRepository,
{
    play_repo: Arc<P>,
}

impl<P> RandomQuestionUseCase<P>
where
    P: PlayRepository,
{
    pub fn new(play_repo: Arc<P>) -> Self {
        Self { play_repo }
    }

    /// Pick one unanswered question uniformly at random
    ///
    /// Draws over the full unanswered set, not a page of it.
    pub async fn pick<R: Rng>(
        &self,
        player_id: &UserId,
        rng: &mut R,
    ) -> QuizResult<QuestionWithCategory> {
        let mut candidates = self.play_repo.candidates(player_id, None, None, None).await?;

        if candidates.is_empty() {
            return Err(QuizError::NoMoreQuestions);
        }

        let index = rng.random_range(0..candidates.len());
        Ok(candidates.swap_remove(index))
    }
}
