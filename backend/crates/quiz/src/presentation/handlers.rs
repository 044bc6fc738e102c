//! HTTP Handlers

use axum::Extension;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{CategoryId, QuestionId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use users::middleware::AuthUser;
use uuid::Uuid;

use crate::application::config::QuizConfig;
use crate::application::{
    AuthoringUseCase, CategoriesUseCase, CreateQuestionInput, LeaderboardUseCase,
    ListQuestionsFilter, ListQuestionsUseCase, RandomQuestionUseCase, SubmitAnswerUseCase,
    UpdateQuestionInput,
};
use crate::domain::repository::{CategoryRepository, PlayRepository, QuestionRepository};
use crate::error::QuizResult;
use crate::presentation::dto::{
    CategoryListResponse, CategoryRequest, CategoryResponse, CreateQuestionRequest,
    LeaderboardEntryDto, LeaderboardResponse, ListQuestionsQuery, QuestionDetail,
    QuestionListResponse, QuestionSummary, SubmitAnswerRequest, SubmitAnswerResponse,
    UpdateQuestionRequest,
};

/// Shared state for quiz handlers
#[derive(Clone)]
pub struct QuizAppState<R>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<QuizConfig>,
}

// ============================================================================
// Question authoring (designer)
// ============================================================================

/// POST /api/designer/questions
pub async fn create_question<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateQuestionRequest>,
) -> QuizResult<(StatusCode, Json<QuestionDetail>)>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthoringUseCase::new(state.repo.clone());
    let question = use_case
        .create(
            &auth.user_id,
            CreateQuestionInput {
                text: req.text,
                options: req.options,
                correct_answer: req.correct_answer,
                category_id: req.category_id.map(CategoryId::from_uuid),
                difficulty: req.difficulty,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(QuestionDetail::from(&question))))
}

/// GET /api/designer/questions
///
/// The listing omits correct answers; the single-question view has them.
pub async fn list_questions<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
) -> QuizResult<Json<QuestionListResponse<QuestionSummary>>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthoringUseCase::new(state.repo.clone());
    let questions = use_case.list(&auth.user_id).await?;

    Ok(Json(QuestionListResponse {
        questions: questions.iter().map(QuestionSummary::from).collect(),
    }))
}

/// GET /api/designer/questions/{id}
pub async fn get_question<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> QuizResult<Json<QuestionDetail>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthoringUseCase::new(state.repo.clone());
    let question = use_case
        .get(&auth.user_id, &QuestionId::from_uuid(id))
        .await?;

    Ok(Json(QuestionDetail::from(&question)))
}

/// PUT /api/designer/questions/{id}
pub async fn update_question<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateQuestionRequest>,
) -> QuizResult<Json<QuestionDetail>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthoringUseCase::new(state.repo.clone());
    let question = use_case
        .update(
            &auth.user_id,
            &QuestionId::from_uuid(id),
            UpdateQuestionInput {
                text: req.text,
                options: req.options,
                correct_answer: req.correct_answer,
                category_id: req
                    .category_id
                    .map(|inner| inner.map(CategoryId::from_uuid)),
                difficulty: req.difficulty,
            },
        )
        .await?;

    Ok(Json(QuestionDetail::from(&question)))
}

/// DELETE /api/designer/questions/{id}
pub async fn delete_question<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> QuizResult<StatusCode>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthoringUseCase::new(state.repo.clone());
    use_case
        .delete(&auth.user_id, &QuestionId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/designer/questions/{id}/related/{relatedId}
pub async fn link_related<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((id, related_id)): Path<(Uuid, Uuid)>,
) -> QuizResult<StatusCode>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthoringUseCase::new(state.repo.clone());
    use_case
        .link_related(
            &auth.user_id,
            &QuestionId::from_uuid(id),
            &QuestionId::from_uuid(related_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/designer/questions/{id}/related/{relatedId}
pub async fn unlink_related<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((id, related_id)): Path<(Uuid, Uuid)>,
) -> QuizResult<StatusCode>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthoringUseCase::new(state.repo.clone());
    use_case
        .unlink_related(
            &auth.user_id,
            &QuestionId::from_uuid(id),
            &QuestionId::from_uuid(related_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Categories (designer)
// ============================================================================

/// POST /api/designer/categories
pub async fn create_category<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CategoryRequest>,
) -> QuizResult<(StatusCode, Json<CategoryResponse>)>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = CategoriesUseCase::new(state.repo.clone());
    let category = use_case.create(&auth.user_id, req.name).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(&category))))
}

/// GET /api/designer/categories
pub async fn list_categories<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
) -> QuizResult<Json<CategoryListResponse>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = CategoriesUseCase::new(state.repo.clone());
    let categories = use_case.list(&auth.user_id).await?;

    Ok(Json(CategoryListResponse {
        categories: categories.iter().map(CategoryResponse::from).collect(),
    }))
}

/// GET /api/designer/categories/{id}
pub async fn get_category<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> QuizResult<Json<CategoryResponse>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = CategoriesUseCase::new(state.repo.clone());
    let category = use_case
        .get(&auth.user_id, &CategoryId::from_uuid(id))
        .await?;

    Ok(Json(CategoryResponse::from(&category)))
}

/// PUT /api/designer/categories/{id}
pub async fn update_category<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<CategoryRequest>,
) -> QuizResult<Json<CategoryResponse>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = CategoriesUseCase::new(state.repo.clone());
    let category = use_case
        .update(&auth.user_id, &CategoryId::from_uuid(id), req.name)
        .await?;

    Ok(Json(CategoryResponse::from(&category)))
}

/// DELETE /api/designer/categories/{id}
pub async fn delete_category<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> QuizResult<StatusCode>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = CategoriesUseCase::new(state.repo.clone());
    use_case
        .delete(&auth.user_id, &CategoryId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Play (player)
// ============================================================================

/// GET /api/player/questions
pub async fn player_questions<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuestionsQuery>,
) -> QuizResult<Json<QuestionListResponse<QuestionSummary>>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        ListQuestionsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let questions = use_case
        .list(
            &auth.user_id,
            ListQuestionsFilter {
                category: query.category,
                difficulty: query.difficulty,
            },
        )
        .await?;

    Ok(Json(QuestionListResponse {
        questions: questions.iter().map(QuestionSummary::from).collect(),
    }))
}

/// GET /api/player/questions/random
pub async fn random_question<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
) -> QuizResult<Json<QuestionSummary>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = RandomQuestionUseCase::new(state.repo.clone());

    // StdRng so the handler future stays Send
    let mut rng = StdRng::from_os_rng();
    let question = use_case.pick(&auth.user_id, &mut rng).await?;

    Ok(Json(QuestionSummary::from(&question)))
}

/// POST /api/player/questions/{id}/answer
pub async fn submit_answer<R>(
    State(state): State<QuizAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitAnswerRequest>,
) -> QuizResult<Json<SubmitAnswerResponse>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = SubmitAnswerUseCase::new(state.repo.clone(), state.repo.clone());
    let output = use_case
        .submit(&auth.user_id, &QuestionId::from_uuid(id), req.answer)
        .await?;

    Ok(Json(SubmitAnswerResponse {
        correct: output.correct,
        points_earned: output.points_earned,
        feedback: output.feedback.to_string(),
    }))
}

/// GET /api/player/leaderboard
pub async fn leaderboard<R>(
    State(state): State<QuizAppState<R>>,
) -> QuizResult<Json<LeaderboardResponse>>
where
    R: QuestionRepository + CategoryRepository + PlayRepository + Clone + Send + Sync + 'static,
{
    let use_case = LeaderboardUseCase::new(state.repo.clone(), state.config.clone());
    let entries = use_case.top().await?;

    Ok(Json(LeaderboardResponse {
        players: entries.iter().map(LeaderboardEntryDto::from).collect(),
    }))
}
