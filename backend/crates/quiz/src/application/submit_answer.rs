//! Answer Submission Use Case
//!
//! Grades a submitted answer and awards points at most once per
//! player/question pair. The store's answer insert is the arbiter under
//! concurrent submissions; this layer never awards points without it.

use std::sync::Arc;

use kernel::id::{QuestionId, UserId};

use crate::domain::repository::{PlayRepository, QuestionRepository};
use crate::error::{QuizError, QuizResult};

/// Outcome of a graded submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAnswerOutput {
    pub correct: bool,
    pub points_earned: i64,
    pub feedback: &'static str,
}

/// Answer submission use case
pub struct SubmitAnswerUseCase<Q, P>
where
    Q: QuestionRepository,
    P: PlayRepository,
{
    question_repo: Arc<Q>,
    play_repo: Arc<P>,
}

impl<Q, P> SubmitAnswerUseCase<Q, P>
where
    Q: QuestionRepository,
    P: PlayRepository,
{
    pub fn new(question_repo: Arc<Q>, play_repo: Arc<P>) -> Self {
        Self {
            question_repo,
            play_repo,
        }
    }

    /// Grade an answer and record it
    pub async fn submit(
        &self,
        player_id: &UserId,
        question_id: &QuestionId,
        answer: usize,
    ) -> QuizResult<SubmitAnswerOutput> {
        let question = self
            .question_repo
            .find_by_id(question_id)
            .await?
            .ok_or(QuizError::QuestionNotFound)?
            .question;

        if answer >= question.options.len() {
            return Err(QuizError::InvalidAnswer {
                index: answer,
                len: question.options.len(),
            });
        }

        let correct = question.is_correct(answer);
        let points = if correct { question.difficulty.points() } else { 0 };

        let recorded = self
            .play_repo
            .record_answer(player_id, question_id, correct, points)
            .await?;
        if !recorded {
            return Err(QuizError::AlreadyAnswered);
        }

        tracing::info!(
            player = %player_id,
            question_id = %question_id,
            correct,
            points,
            "Answer recorded"
        );

        Ok(SubmitAnswerOutput {
            correct,
            points_earned: points,
            feedback: if correct {
                "Correct answer!"
            } else {
                "Wrong answer."
            },
        })
    }
}
