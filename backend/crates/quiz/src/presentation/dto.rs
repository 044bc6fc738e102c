//! Data Transfer Objects
//!
//! Request/response types for the HTTP API. Player-facing question views
//! never carry the correct answer; designer views do.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::entity::category::Category;
use crate::domain::repository::{LeaderboardEntry, QuestionWithCategory};

/// Distinguish an absent field from an explicit null
///
/// With this, `{"categoryId": null}` clears the category while leaving
/// the field out keeps it.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

// ============================================================================
// Question authoring
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub category_id: Option<Uuid>,
    pub difficulty: i16,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<usize>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<Uuid>>,
    pub difficulty: Option<i16>,
}

/// Category as embedded in question views
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// Designer view of a question, correct answer included
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    pub id: Uuid,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub category: Option<CategoryRef>,
    pub difficulty: i16,
    pub related_questions: Vec<Uuid>,
}

impl From<&QuestionWithCategory> for QuestionDetail {
    fn from(q: &QuestionWithCategory) -> Self {
        Self {
            id: q.question.question_id.into_uuid(),
            text: q.question.text.clone(),
            options: q.question.options.clone(),
            correct_answer: q.question.correct_answer,
            category: category_ref(q),
            difficulty: q.question.difficulty.value(),
            related_questions: q
                .question
                .related_ids
                .iter()
                .map(|id| id.into_uuid())
                .collect(),
        }
    }
}

/// Player view of a question, correct answer stripped
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub id: Uuid,
    pub text: String,
    pub options: Vec<String>,
    pub category: Option<CategoryRef>,
    pub difficulty: i16,
    pub related_questions: Vec<Uuid>,
}

impl From<&QuestionWithCategory> for QuestionSummary {
    fn from(q: &QuestionWithCategory) -> Self {
        Self {
            id: q.question.question_id.into_uuid(),
            text: q.question.text.clone(),
            options: q.question.options.clone(),
            category: category_ref(q),
            difficulty: q.question.difficulty.value(),
            related_questions: q
                .question
                .related_ids
                .iter()
                .map(|id| id.into_uuid())
                .collect(),
        }
    }
}

fn category_ref(q: &QuestionWithCategory) -> Option<CategoryRef> {
    match (&q.question.category_id, &q.category_name) {
        (Some(id), Some(name)) => Some(CategoryRef {
            id: id.into_uuid(),
            name: name.clone(),
        }),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListResponse<T> {
    pub questions: Vec<T>,
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.category_id.into_uuid(),
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
}

// ============================================================================
// Play
// ============================================================================

/// Query filters for GET /api/player/questions
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsQuery {
    pub category: Option<String>,
    pub difficulty: Option<i16>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    pub answer: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    pub points_earned: i64,
    pub feedback: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub handle: String,
    pub points: i64,
}

impl From<&LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            handle: entry.handle.clone(),
            points: entry.points,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub players: Vec<LeaderboardEntryDto>,
}
