//! PostgreSQL Repository Implementations

use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, QuestionId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{category::Category, question::Question};
use crate::domain::repository::{
    CategoryRepository, LeaderboardEntry, PlayRepository, QuestionRepository, QuestionWithCategory,
};
use crate::domain::value_object::difficulty::Difficulty;
use crate::error::{QuizError, QuizResult};

/// Upper bound on any single store call
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a store future under the standard time budget
async fn bounded<T>(
    fut: impl Future<Output = Result<T, sqlx::Error>>,
) -> QuizResult<T> {
    match tokio::time::timeout(STORE_TIMEOUT, fut).await {
        Ok(result) => result.map_err(QuizError::from),
        Err(_) => Err(QuizError::Timeout),
    }
}

/// Shared SELECT for a question joined with its category name and
/// relation ids
const QUESTION_SELECT: &str = r#"
    SELECT q.question_id, q.text, q.options, q.correct_answer, q.category_id,
           q.difficulty, q.creator_id, q.created_at, q.updated_at,
           c.name AS category_name,
           ARRAY(
               SELECT r.related_id
               FROM related_questions r
               WHERE r.question_id = q.question_id
               ORDER BY r.created_at
           ) AS related_ids
    FROM questions q
    LEFT JOIN categories c ON c.category_id = q.category_id
"#;

/// PostgreSQL-backed quiz repository
#[derive(Clone)]
pub struct PgQuizRepository {
    pool: PgPool,
}

impl PgQuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Question Repository Implementation
// ============================================================================

impl QuestionRepository for PgQuizRepository {
    async fn create(&self, question: &Question) -> QuizResult<()> {
        bounded(
            sqlx::query(
                r#"
                INSERT INTO questions (
                    question_id,
                    text,
                    options,
                    correct_answer,
                    category_id,
                    difficulty,
                    creator_id,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(question.question_id.as_uuid())
            .bind(&question.text)
            .bind(&question.options)
            .bind(question.correct_answer as i16)
            .bind(question.category_id.as_ref().map(|id| id.as_uuid()))
            .bind(question.difficulty.value())
            .bind(question.creator_id.as_uuid())
            .bind(question.created_at)
            .bind(question.updated_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        question_id: &QuestionId,
    ) -> QuizResult<Option<QuestionWithCategory>> {
        let sql = format!("{QUESTION_SELECT} WHERE q.question_id = $1");
        let row = bounded(
            sqlx::query_as::<_, QuestionRow>(&sql)
                .bind(question_id.as_uuid())
                .fetch_optional(&self.pool),
        )
        .await?;

        row.map(|r| r.into_question_with_category()).transpose()
    }

    async fn list_by_creator(&self, creator_id: &UserId) -> QuizResult<Vec<QuestionWithCategory>> {
        let sql = format!("{QUESTION_SELECT} WHERE q.creator_id = $1 ORDER BY q.created_at");
        let rows = bounded(
            sqlx::query_as::<_, QuestionRow>(&sql)
                .bind(creator_id.as_uuid())
                .fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter()
            .map(|r| r.into_question_with_category())
            .collect()
    }

    async fn update(&self, question: &Question) -> QuizResult<()> {
        bounded(
            sqlx::query(
                r#"
                UPDATE questions SET
                    text = $2,
                    options = $3,
                    correct_answer = $4,
                    category_id = $5,
                    difficulty = $6,
                    updated_at = $7
                WHERE question_id = $1
                "#,
            )
            .bind(question.question_id.as_uuid())
            .bind(&question.text)
            .bind(&question.options)
            .bind(question.correct_answer as i16)
            .bind(question.category_id.as_ref().map(|id| id.as_uuid()))
            .bind(question.difficulty.value())
            .bind(question.updated_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn delete(&self, question_id: &QuestionId) -> QuizResult<bool> {
        let result = bounded(
            sqlx::query("DELETE FROM questions WHERE question_id = $1")
                .bind(question_id.as_uuid())
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn link_related(
        &self,
        question_id: &QuestionId,
        related_id: &QuestionId,
    ) -> QuizResult<bool> {
        let result = bounded(
            sqlx::query(
                r#"
                INSERT INTO related_questions (question_id, related_id, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (question_id, related_id) DO NOTHING
                "#,
            )
            .bind(question_id.as_uuid())
            .bind(related_id.as_uuid())
            .bind(Utc::now())
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unlink_related(
        &self,
        question_id: &QuestionId,
        related_id: &QuestionId,
    ) -> QuizResult<bool> {
        let result = bounded(
            sqlx::query(
                "DELETE FROM related_questions WHERE question_id = $1 AND related_id = $2",
            )
            .bind(question_id.as_uuid())
            .bind(related_id.as_uuid())
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgQuizRepository {
    async fn create(&self, category: &Category) -> QuizResult<()> {
        bounded(
            sqlx::query(
                r#"
                INSERT INTO categories (
                    category_id,
                    name,
                    creator_id,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(category.category_id.as_uuid())
            .bind(&category.name)
            .bind(category.creator_id.as_uuid())
            .bind(category.created_at)
            .bind(category.updated_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, category_id: &CategoryId) -> QuizResult<Option<Category>> {
        let row = bounded(
            sqlx::query_as::<_, CategoryRow>(
                r#"
                SELECT category_id, name, creator_id, created_at, updated_at
                FROM categories
                WHERE category_id = $1
                "#,
            )
            .bind(category_id.as_uuid())
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.map(|r| r.into_category()))
    }

    async fn find_by_name(&self, name: &str) -> QuizResult<Option<Category>> {
        // Names are not unique; take the oldest match for determinism.
        let row = bounded(
            sqlx::query_as::<_, CategoryRow>(
                r#"
                SELECT category_id, name, creator_id, created_at, updated_at
                FROM categories
                WHERE name = $1
                ORDER BY created_at
                LIMIT 1
                "#,
            )
            .bind(name)
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.map(|r| r.into_category()))
    }

    async fn list_by_creator(&self, creator_id: &UserId) -> QuizResult<Vec<Category>> {
        let rows = bounded(
            sqlx::query_as::<_, CategoryRow>(
                r#"
                SELECT category_id, name, creator_id, created_at, updated_at
                FROM categories
                WHERE creator_id = $1
                ORDER BY created_at
                "#,
            )
            .bind(creator_id.as_uuid())
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows.into_iter().map(|r| r.into_category()).collect())
    }

    async fn update(&self, category: &Category) -> QuizResult<()> {
        bounded(
            sqlx::query(
                r#"
                UPDATE categories SET
                    name = $2,
                    updated_at = $3
                WHERE category_id = $1
                "#,
            )
            .bind(category.category_id.as_uuid())
            .bind(&category.name)
            .bind(category.updated_at)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn delete(&self, category_id: &CategoryId) -> QuizResult<bool> {
        // questions.category_id is ON DELETE SET NULL
        let result = bounded(
            sqlx::query("DELETE FROM categories WHERE category_id = $1")
                .bind(category_id.as_uuid())
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Play Repository Implementation
// ============================================================================

impl PlayRepository for PgQuizRepository {
    async fn candidates(
        &self,
        player_id: &UserId,
        category_id: Option<&CategoryId>,
        difficulty: Option<Difficulty>,
        limit: Option<i64>,
    ) -> QuizResult<Vec<QuestionWithCategory>> {
        // LIMIT NULL means no limit in PostgreSQL
        let sql = format!(
            r#"
            {QUESTION_SELECT}
            WHERE NOT EXISTS (
                SELECT 1 FROM answered_questions a
                WHERE a.user_id = $1 AND a.question_id = q.question_id
            )
            AND ($2::uuid IS NULL OR q.category_id = $2)
            AND ($3::smallint IS NULL OR q.difficulty = $3)
            ORDER BY q.created_at, q.question_id
            LIMIT $4
            "#
        );

        let rows = bounded(
            sqlx::query_as::<_, QuestionRow>(&sql)
                .bind(player_id.as_uuid())
                .bind(category_id.map(|id| id.as_uuid()))
                .bind(difficulty.map(|d| d.value()))
                .bind(limit)
                .fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter()
            .map(|r| r.into_question_with_category())
            .collect()
    }

    async fn record_answer(
        &self,
        player_id: &UserId,
        question_id: &QuestionId,
        was_correct: bool,
        points: i64,
    ) -> QuizResult<bool> {
        let player = player_id.as_uuid();
        let question = question_id.as_uuid();
        let pool = self.pool.clone();

        // The answer insert and the points increment commit together.
        // A conflicting insert means another submission won the race.
        bounded(async move {
            let mut tx = pool.begin().await?;

            let inserted = sqlx::query(
                r#"
                INSERT INTO answered_questions (
                    user_id, question_id, was_correct, points_earned, answered_at
                ) VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (user_id, question_id) DO NOTHING
                "#,
            )
            .bind(player)
            .bind(question)
            .bind(was_correct)
            .bind(points)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            if inserted.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(false);
            }

            if points > 0 {
                sqlx::query("UPDATE users SET points = points + $2, updated_at = $3 WHERE user_id = $1")
                    .bind(player)
                    .bind(points)
                    .bind(Utc::now())
                    .execute(&mut *tx)
                    .await?;
            }

            tx.commit().await?;
            Ok(true)
        })
        .await
    }

    async fn top_players(&self, limit: i64) -> QuizResult<Vec<LeaderboardEntry>> {
        // Ties break by registration time, then id, so the board is stable
        let rows = bounded(
            sqlx::query_as::<_, LeaderboardRow>(
                r#"
                SELECT handle, points
                FROM users
                WHERE role = 1
                ORDER BY points DESC, created_at ASC, user_id ASC
                LIMIT $1
                "#,
            )
            .bind(limit)
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LeaderboardEntry {
                handle: r.handle,
                points: r.points,
            })
            .collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct QuestionRow {
    question_id: Uuid,
    text: String,
    options: Vec<String>,
    correct_answer: i16,
    category_id: Option<Uuid>,
    difficulty: i16,
    creator_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: Option<String>,
    related_ids: Vec<Uuid>,
}

impl QuestionRow {
    fn into_question_with_category(self) -> QuizResult<QuestionWithCategory> {
        let difficulty = Difficulty::new(self.difficulty).map_err(|_| {
            QuizError::Internal(format!("Invalid difficulty in store: {}", self.difficulty))
        })?;

        Ok(QuestionWithCategory {
            question: Question {
                question_id: QuestionId::from_uuid(self.question_id),
                text: self.text,
                options: self.options,
                correct_answer: self.correct_answer as usize,
                category_id: self.category_id.map(CategoryId::from_uuid),
                difficulty,
                creator_id: UserId::from_uuid(self.creator_id),
                related_ids: self
                    .related_ids
                    .into_iter()
                    .map(QuestionId::from_uuid)
                    .collect(),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            category_name: self.category_name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    creator_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: CategoryId::from_uuid(self.category_id),
            name: self.name,
            creator_id: UserId::from_uuid(self.creator_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    handle: String,
    points: i64,
}
