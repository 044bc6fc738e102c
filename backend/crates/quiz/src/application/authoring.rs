//! Question Authoring Use Case
//!
//! Designer-scoped CRUD over questions plus the related-question graph.
//! Every operation resolves the question through the caller's ownership,
//! so another designer's question is indistinguishable from a missing one.

use std::sync::Arc;

use kernel::id::{CategoryId, QuestionId, UserId};

use crate::domain::entity::question::Question;
use crate::domain::repository::{QuestionRepository, QuestionWithCategory};
use crate::domain::value_object::difficulty::Difficulty;
use crate::error::{QuizError, QuizResult};

/// Input for creating a question
#[derive(Debug, Clone)]
pub struct CreateQuestionInput {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub category_id: Option<CategoryId>,
    pub difficulty: i16,
}

/// Input for updating a question. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateQuestionInput {
    pub text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<usize>,
    pub category_id: Option<Option<CategoryId>>,
    pub difficulty: Option<i16>,
}

/// Question authoring use case
pub struct AuthoringUseCase<Q>
where
    Q: QuestionRepository,
{
    question_repo: Arc<Q>,
}

impl<Q> AuthoringUseCase<Q>
where
    Q: QuestionRepository,
{
    pub fn new(question_repo: Arc<Q>) -> Self {
        Self { question_repo }
    }

    /// Create a question owned by `creator_id`
    pub async fn create(
        &self,
        creator_id: &UserId,
        input: CreateQuestionInput,
    ) -> QuizResult<QuestionWithCategory> {
        let difficulty = Difficulty::new(input.difficulty)?;
        let question = Question::new(
            input.text,
            input.options,
            input.correct_answer,
            input.category_id,
            difficulty,
            *creator_id,
        )?;

        self.question_repo.create(&question).await?;

        tracing::info!(
            question_id = %question.question_id,
            creator = %creator_id,
            "Question created"
        );

        // Re-read for the joined category name
        self.question_repo
            .find_by_id(&question.question_id)
            .await?
            .ok_or(QuizError::QuestionNotFound)
    }

    /// Fetch one of the caller's questions
    pub async fn get(
        &self,
        creator_id: &UserId,
        question_id: &QuestionId,
    ) -> QuizResult<QuestionWithCategory> {
        self.find_owned(creator_id, question_id).await
    }

    /// List the caller's questions
    pub async fn list(&self, creator_id: &UserId) -> QuizResult<Vec<QuestionWithCategory>> {
        self.question_repo.list_by_creator(creator_id).await
    }

    /// Update one of the caller's questions
    ///
    /// The merged options/answer pair is re-validated, so a partial update
    /// cannot leave the answer index dangling.
    pub async fn update(
        &self,
        creator_id: &UserId,
        question_id: &QuestionId,
        input: UpdateQuestionInput,
    ) -> QuizResult<QuestionWithCategory> {
        let mut question = self.find_owned(creator_id, question_id).await?.question;

        if let Some(text) = input.text {
            question.text = text;
        }
        if let Some(options) = input.options {
            question.options = options;
        }
        if let Some(correct_answer) = input.correct_answer {
            question.correct_answer = correct_answer;
        }
        if let Some(category_id) = input.category_id {
            question.category_id = category_id;
        }
        if let Some(difficulty) = input.difficulty {
            question.difficulty = Difficulty::new(difficulty)?;
        }

        Question::validate_answer_bounds(&question.options, question.correct_answer)?;
        question.updated_at = chrono::Utc::now();

        self.question_repo.update(&question).await?;

        self.question_repo
            .find_by_id(question_id)
            .await?
            .ok_or(QuizError::QuestionNotFound)
    }

    /// Delete one of the caller's questions
    pub async fn delete(&self, creator_id: &UserId, question_id: &QuestionId) -> QuizResult<()> {
        self.find_owned(creator_id, question_id).await?;
        self.question_repo.delete(question_id).await?;

        tracing::info!(question_id = %question_id, "Question deleted");
        Ok(())
    }

    /// Link two of the caller's questions as related. Idempotent.
    pub async fn link_related(
        &self,
        creator_id: &UserId,
        question_id: &QuestionId,
        related_id: &QuestionId,
    ) -> QuizResult<()> {
        if question_id.as_uuid() == related_id.as_uuid() {
            return Err(QuizError::SelfRelation);
        }

        self.find_owned(creator_id, question_id).await?;

        // The related question only has to exist; it may belong to anyone
        self.question_repo
            .find_by_id(related_id)
            .await?
            .ok_or(QuizError::QuestionNotFound)?;

        let inserted = self
            .question_repo
            .link_related(question_id, related_id)
            .await?;
        if inserted {
            tracing::info!(
                question_id = %question_id,
                related_id = %related_id,
                "Related question linked"
            );
        }

        Ok(())
    }

    /// Remove a relation edge. Idempotent.
    pub async fn unlink_related(
        &self,
        creator_id: &UserId,
        question_id: &QuestionId,
        related_id: &QuestionId,
    ) -> QuizResult<()> {
        if question_id.as_uuid() == related_id.as_uuid() {
            return Err(QuizError::SelfRelation);
        }

        self.find_owned(creator_id, question_id).await?;

        let removed = self
            .question_repo
            .unlink_related(question_id, related_id)
            .await?;
        if removed {
            tracing::info!(
                question_id = %question_id,
                related_id = %related_id,
                "Related question unlinked"
            );
        }

        Ok(())
    }

    async fn find_owned(
        &self,
        creator_id: &UserId,
        question_id: &QuestionId,
    ) -> QuizResult<QuestionWithCategory> {
        self.question_repo
            .find_by_id(question_id)
            .await?
            .filter(|q| q.question.creator_id.as_uuid() == creator_id.as_uuid())
            .ok_or(QuizError::QuestionNotFound)
    }
}
