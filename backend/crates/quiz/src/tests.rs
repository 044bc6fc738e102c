//! Unit tests for the quiz crate
//!
//! Use cases are driven against an in-memory repository so the suites
//! run without a database.

#[cfg(test)]
mod support {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use kernel::id::{CategoryId, QuestionId, UserId};
    use uuid::Uuid;

    use crate::domain::entity::{category::Category, question::Question};
    use crate::domain::repository::{
        CategoryRepository, LeaderboardEntry, PlayRepository, QuestionRepository,
        QuestionWithCategory,
    };
    use crate::domain::value_object::difficulty::Difficulty;
    use crate::error::QuizResult;

    #[derive(Clone)]
    pub struct PlayerEntry {
        pub user_id: Uuid,
        pub handle: String,
        pub points: i64,
        pub is_player: bool,
    }

    /// In-memory repository implementing all quiz traits
    ///
    /// Vectors keep insertion order, standing in for created_at ordering.
    #[derive(Clone, Default)]
    pub struct MockRepo {
        questions: Arc<Mutex<Vec<Question>>>,
        categories: Arc<Mutex<Vec<Category>>>,
        related: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
        answered: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
        players: Arc<Mutex<Vec<PlayerEntry>>>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_player(&self, handle: &str) -> UserId {
            let user_id = UserId::new();
            self.players.lock().unwrap().push(PlayerEntry {
                user_id: user_id.into_uuid(),
                handle: handle.to_string(),
                points: 0,
                is_player: true,
            });
            user_id
        }

        pub fn add_designer(&self, handle: &str) -> UserId {
            let user_id = UserId::new();
            self.players.lock().unwrap().push(PlayerEntry {
                user_id: user_id.into_uuid(),
                handle: handle.to_string(),
                points: 0,
                is_player: false,
            });
            user_id
        }

        pub fn set_points(&self, user_id: &UserId, points: i64) {
            let mut players = self.players.lock().unwrap();
            if let Some(entry) = players
                .iter_mut()
                .find(|p| p.user_id == *user_id.as_uuid())
            {
                entry.points = points;
            }
        }

        pub fn points_of(&self, user_id: &UserId) -> i64 {
            self.players
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.user_id == *user_id.as_uuid())
                .map(|p| p.points)
                .unwrap_or(0)
        }

        fn with_category(&self, question: Question) -> QuestionWithCategory {
            let category_name = question.category_id.as_ref().and_then(|id| {
                self.categories
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|c| c.category_id.as_uuid() == id.as_uuid())
                    .map(|c| c.name.clone())
            });

            let related_ids = self
                .related
                .lock()
                .unwrap()
                .iter()
                .filter(|(q, _)| q == question.question_id.as_uuid())
                .map(|(_, r)| QuestionId::from_uuid(*r))
                .collect();

            let mut question = question;
            question.related_ids = related_ids;

            QuestionWithCategory {
                question,
                category_name,
            }
        }
    }

    impl QuestionRepository for MockRepo {
        async fn create(&self, question: &Question) -> QuizResult<()> {
            self.questions.lock().unwrap().push(question.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            question_id: &QuestionId,
        ) -> QuizResult<Option<QuestionWithCategory>> {
            let question = self
                .questions
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.question_id.as_uuid() == question_id.as_uuid())
                .cloned();
            Ok(question.map(|q| self.with_category(q)))
        }

        async fn list_by_creator(
            &self,
            creator_id: &UserId,
        ) -> QuizResult<Vec<QuestionWithCategory>> {
            let questions: Vec<Question> = self
                .questions
                .lock()
                .unwrap()
                .iter()
                .filter(|q| q.creator_id.as_uuid() == creator_id.as_uuid())
                .cloned()
                .collect();
            Ok(questions
                .into_iter()
                .map(|q| self.with_category(q))
                .collect())
        }

        async fn update(&self, question: &Question) -> QuizResult<()> {
            let mut questions = self.questions.lock().unwrap();
            if let Some(slot) = questions
                .iter_mut()
                .find(|q| q.question_id.as_uuid() == question.question_id.as_uuid())
            {
                *slot = question.clone();
            }
            Ok(())
        }

        async fn delete(&self, question_id: &QuestionId) -> QuizResult<bool> {
            let mut questions = self.questions.lock().unwrap();
            let before = questions.len();
            questions.retain(|q| q.question_id.as_uuid() != question_id.as_uuid());
            Ok(questions.len() < before)
        }

        async fn link_related(
            &self,
            question_id: &QuestionId,
            related_id: &QuestionId,
        ) -> QuizResult<bool> {
            Ok(self
                .related
                .lock()
                .unwrap()
                .insert((question_id.into_uuid(), related_id.into_uuid())))
        }

        async fn unlink_related(
            &self,
            question_id: &QuestionId,
            related_id: &QuestionId,
        ) -> QuizResult<bool> {
            Ok(self
                .related
                .lock()
                .unwrap()
                .remove(&(question_id.into_uuid(), related_id.into_uuid())))
        }
    }

    impl CategoryRepository for MockRepo {
        async fn create(&self, category: &Category) -> QuizResult<()> {
            self.categories.lock().unwrap().push(category.clone());
            Ok(())
        }

        async fn find_by_id(&self, category_id: &CategoryId) -> QuizResult<Option<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.category_id.as_uuid() == category_id.as_uuid())
                .cloned())
        }

        async fn find_by_name(&self, name: &str) -> QuizResult<Option<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.name == name)
                .cloned())
        }

        async fn list_by_creator(&self, creator_id: &UserId) -> QuizResult<Vec<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.creator_id.as_uuid() == creator_id.as_uuid())
                .cloned()
                .collect())
        }

        async fn update(&self, category: &Category) -> QuizResult<()> {
            let mut categories = self.categories.lock().unwrap();
            if let Some(slot) = categories
                .iter_mut()
                .find(|c| c.category_id.as_uuid() == category.category_id.as_uuid())
            {
                *slot = category.clone();
            }
            Ok(())
        }

        async fn delete(&self, category_id: &CategoryId) -> QuizResult<bool> {
            let mut categories = self.categories.lock().unwrap();
            let before = categories.len();
            categories.retain(|c| c.category_id.as_uuid() != category_id.as_uuid());
            Ok(categories.len() < before)
        }
    }

    impl PlayRepository for MockRepo {
        async fn candidates(
            &self,
            player_id: &UserId,
            category_id: Option<&CategoryId>,
            difficulty: Option<Difficulty>,
            limit: Option<i64>,
        ) -> QuizResult<Vec<QuestionWithCategory>> {
            let answered = self.answered.lock().unwrap().clone();
            let questions: Vec<Question> = self
                .questions
                .lock()
                .unwrap()
                .iter()
                .filter(|q| {
                    !answered.contains(&(player_id.into_uuid(), q.question_id.into_uuid()))
                })
                .filter(|q| match category_id {
                    Some(id) => q.category_id.as_ref().map(|c| c.as_uuid()) == Some(id.as_uuid()),
                    None => true,
                })
                .filter(|q| match difficulty {
                    Some(d) => q.difficulty == d,
                    None => true,
                })
                .cloned()
                .collect();

            let mut result: Vec<QuestionWithCategory> = questions
                .into_iter()
                .map(|q| self.with_category(q))
                .collect();
            if let Some(limit) = limit {
                result.truncate(limit as usize);
            }
            Ok(result)
        }

        async fn record_answer(
            &self,
            player_id: &UserId,
            question_id: &QuestionId,
            _was_correct: bool,
            points: i64,
        ) -> QuizResult<bool> {
            let inserted = self
                .answered
                .lock()
                .unwrap()
                .insert((player_id.into_uuid(), question_id.into_uuid()));
            if !inserted {
                return Ok(false);
            }

            if points > 0 {
                let mut players = self.players.lock().unwrap();
                if let Some(entry) = players
                    .iter_mut()
                    .find(|p| p.user_id == *player_id.as_uuid())
                {
                    entry.points += points;
                }
            }
            Ok(true)
        }

        async fn top_players(&self, limit: i64) -> QuizResult<Vec<LeaderboardEntry>> {
            let players = self.players.lock().unwrap();
            // Insertion order stands in for registration time on ties
            let mut ranked: Vec<(usize, &PlayerEntry)> = players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_player)
                .collect();
            ranked.sort_by(|(ia, a), (ib, b)| b.points.cmp(&a.points).then(ia.cmp(ib)));
            Ok(ranked
                .into_iter()
                .take(limit as usize)
                .map(|(_, p)| LeaderboardEntry {
                    handle: p.handle.clone(),
                    points: p.points,
                })
                .collect())
        }
    }
}

#[cfg(test)]
mod authoring_tests {
    use std::sync::Arc;

    use kernel::id::UserId;

    use super::support::MockRepo;
    use crate::application::{AuthoringUseCase, CreateQuestionInput, UpdateQuestionInput};
    use crate::error::QuizError;

    fn use_case(repo: &MockRepo) -> AuthoringUseCase<MockRepo> {
        AuthoringUseCase::new(Arc::new(repo.clone()))
    }

    fn input(difficulty: i16) -> CreateQuestionInput {
        CreateQuestionInput {
            text: "What is 2+2?".to_string(),
            options: vec!["3".to_string(), "4".to_string(), "5".to_string()],
            correct_answer: 1,
            category_id: None,
            difficulty,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);

        let created = uc.create(&designer, input(3)).await.unwrap();
        let fetched = uc
            .get(&designer, &created.question.question_id)
            .await
            .unwrap();

        assert_eq!(fetched.question.text, "What is 2+2?");
        assert_eq!(fetched.question.correct_answer, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_difficulty() {
        let repo = MockRepo::new();
        let result = use_case(&repo).create(&UserId::new(), input(6)).await;
        assert!(matches!(result, Err(QuizError::InvalidDifficulty(6))));
    }

    #[tokio::test]
    async fn test_other_designers_question_reads_as_missing() {
        let repo = MockRepo::new();
        let uc = use_case(&repo);
        let created = uc.create(&UserId::new(), input(1)).await.unwrap();

        let result = uc.get(&UserId::new(), &created.question.question_id).await;
        assert!(matches!(result, Err(QuizError::QuestionNotFound)));
    }

    #[tokio::test]
    async fn test_list_is_creator_scoped() {
        let repo = MockRepo::new();
        let uc = use_case(&repo);
        let alice = UserId::new();
        let bob = UserId::new();

        uc.create(&alice, input(1)).await.unwrap();
        uc.create(&alice, input(2)).await.unwrap();
        uc.create(&bob, input(3)).await.unwrap();

        assert_eq!(uc.list(&alice).await.unwrap().len(), 2);
        assert_eq!(uc.list(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_revalidates_answer_bounds() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);
        let created = uc.create(&designer, input(2)).await.unwrap();

        // Shrinking options below the current answer index must fail
        let result = uc
            .update(
                &designer,
                &created.question.question_id,
                UpdateQuestionInput {
                    options: Some(vec!["only".to_string()]),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(QuizError::InvalidCorrectAnswer { index: 1, len: 1 })
        ));
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);
        let created = uc.create(&designer, input(2)).await.unwrap();

        let updated = uc
            .update(
                &designer,
                &created.question.question_id,
                UpdateQuestionInput {
                    text: Some("Updated?".to_string()),
                    difficulty: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.question.text, "Updated?");
        assert_eq!(updated.question.difficulty.value(), 5);
        // Untouched fields survive
        assert_eq!(updated.question.correct_answer, 1);
    }

    #[tokio::test]
    async fn test_delete_then_get_not_found() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);
        let created = uc.create(&designer, input(1)).await.unwrap();

        uc.delete(&designer, &created.question.question_id)
            .await
            .unwrap();
        let result = uc.get(&designer, &created.question.question_id).await;
        assert!(matches!(result, Err(QuizError::QuestionNotFound)));
    }

    #[tokio::test]
    async fn test_self_relation_rejected() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);
        let created = uc.create(&designer, input(1)).await.unwrap();

        let result = uc
            .link_related(
                &designer,
                &created.question.question_id,
                &created.question.question_id,
            )
            .await;
        assert!(matches!(result, Err(QuizError::SelfRelation)));
    }

    #[tokio::test]
    async fn test_link_and_unlink_are_idempotent() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);
        let a = uc.create(&designer, input(1)).await.unwrap();
        let b = uc.create(&designer, input(2)).await.unwrap();

        uc.link_related(&designer, &a.question.question_id, &b.question.question_id)
            .await
            .unwrap();
        uc.link_related(&designer, &a.question.question_id, &b.question.question_id)
            .await
            .unwrap();

        let fetched = uc.get(&designer, &a.question.question_id).await.unwrap();
        assert_eq!(fetched.question.related_ids.len(), 1);

        uc.unlink_related(&designer, &a.question.question_id, &b.question.question_id)
            .await
            .unwrap();
        // Second unlink is a no-op, not an error
        uc.unlink_related(&designer, &a.question.question_id, &b.question.question_id)
            .await
            .unwrap();

        let fetched = uc.get(&designer, &a.question.question_id).await.unwrap();
        assert!(fetched.question.related_ids.is_empty());
    }

    #[tokio::test]
    async fn test_link_requires_owning_the_base_question() {
        let repo = MockRepo::new();
        let uc = use_case(&repo);
        let alice = UserId::new();
        let bob = UserId::new();
        let mine = uc.create(&alice, input(1)).await.unwrap();
        let theirs = uc.create(&bob, input(1)).await.unwrap();

        // Linking from someone else's question fails
        let result = uc
            .link_related(
                &alice,
                &theirs.question.question_id,
                &mine.question.question_id,
            )
            .await;
        assert!(matches!(result, Err(QuizError::QuestionNotFound)));

        // Linking to someone else's question is fine
        uc.link_related(
            &alice,
            &mine.question.question_id,
            &theirs.question.question_id,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_link_to_missing_question_not_found() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);
        let mine = uc.create(&designer, input(1)).await.unwrap();

        let result = uc
            .link_related(
                &designer,
                &mine.question.question_id,
                &kernel::id::QuestionId::new(),
            )
            .await;
        assert!(matches!(result, Err(QuizError::QuestionNotFound)));
    }
}

#[cfg(test)]
mod category_tests {
    use std::sync::Arc;

    use kernel::id::{CategoryId, UserId};

    use super::support::MockRepo;
    use crate::application::CategoriesUseCase;
    use crate::error::QuizError;

    fn use_case(repo: &MockRepo) -> CategoriesUseCase<MockRepo> {
        CategoriesUseCase::new(Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn test_create_and_rename() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let uc = use_case(&repo);

        let category = uc.create(&designer, "History".to_string()).await.unwrap();
        let renamed = uc
            .update(&designer, &category.category_id, "Geography".to_string())
            .await
            .unwrap();

        assert_eq!(renamed.name, "Geography");
    }

    #[tokio::test]
    async fn test_list_is_creator_scoped() {
        let repo = MockRepo::new();
        let uc = use_case(&repo);
        let alice = UserId::new();
        let bob = UserId::new();

        uc.create(&alice, "History".to_string()).await.unwrap();
        uc.create(&bob, "Science".to_string()).await.unwrap();

        let listed = uc.list(&alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "History");
    }

    #[tokio::test]
    async fn test_other_designers_category_reads_as_missing() {
        let repo = MockRepo::new();
        let uc = use_case(&repo);
        let category = uc
            .create(&UserId::new(), "History".to_string())
            .await
            .unwrap();

        let result = uc.get(&UserId::new(), &category.category_id).await;
        assert!(matches!(result, Err(QuizError::CategoryNotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_not_found() {
        let repo = MockRepo::new();
        let result = use_case(&repo)
            .delete(&UserId::new(), &CategoryId::new())
            .await;
        assert!(matches!(result, Err(QuizError::CategoryNotFound)));
    }
}

#[cfg(test)]
mod list_tests {
    use std::sync::Arc;

    use kernel::id::UserId;

    use super::support::MockRepo;
    use crate::application::config::QuizConfig;
    use crate::application::{
        AuthoringUseCase, CategoriesUseCase, CreateQuestionInput, ListQuestionsFilter,
        ListQuestionsUseCase, SubmitAnswerUseCase,
    };
    use crate::error::QuizError;

    fn list_use_case(repo: &MockRepo) -> ListQuestionsUseCase<MockRepo, MockRepo> {
        ListQuestionsUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(QuizConfig::default()),
        )
    }

    async fn seed_question(
        repo: &MockRepo,
        designer: &UserId,
        category_id: Option<kernel::id::CategoryId>,
        difficulty: i16,
    ) -> kernel::id::QuestionId {
        AuthoringUseCase::new(Arc::new(repo.clone()))
            .create(
                designer,
                CreateQuestionInput {
                    text: "q".to_string(),
                    options: vec!["a".to_string(), "b".to_string()],
                    correct_answer: 0,
                    category_id,
                    difficulty,
                },
            )
            .await
            .unwrap()
            .question
            .question_id
    }

    #[tokio::test]
    async fn test_filters_by_category_name_and_difficulty() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let player = repo.add_player("alice");

        let history = CategoriesUseCase::new(Arc::new(repo.clone()))
            .create(&designer, "History".to_string())
            .await
            .unwrap();

        seed_question(&repo, &designer, Some(history.category_id), 2).await;
        seed_question(&repo, &designer, Some(history.category_id), 4).await;
        seed_question(&repo, &designer, None, 2).await;

        let questions = list_use_case(&repo)
            .list(
                &player,
                ListQuestionsFilter {
                    category: Some("History".to_string()),
                    difficulty: Some(2),
                },
            )
            .await
            .unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].category_name.as_deref(), Some("History"));
        assert_eq!(questions[0].question.difficulty.value(), 2);
    }

    #[tokio::test]
    async fn test_unknown_category_name_errors() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");

        let result = list_use_case(&repo)
            .list(
                &player,
                ListQuestionsFilter {
                    category: Some("Nope".to_string()),
                    difficulty: None,
                },
            )
            .await;

        assert!(matches!(result, Err(QuizError::CategoryNotFound)));
    }

    #[tokio::test]
    async fn test_invalid_difficulty_filter_errors() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");

        let result = list_use_case(&repo)
            .list(
                &player,
                ListQuestionsFilter {
                    category: None,
                    difficulty: Some(7),
                },
            )
            .await;

        assert!(matches!(result, Err(QuizError::InvalidDifficulty(7))));
    }

    #[tokio::test]
    async fn test_answered_questions_are_excluded() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let player = repo.add_player("alice");

        let answered_id = seed_question(&repo, &designer, None, 1).await;
        seed_question(&repo, &designer, None, 1).await;

        SubmitAnswerUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
            .submit(&player, &answered_id, 0)
            .await
            .unwrap();

        let questions = list_use_case(&repo)
            .list(&player, ListQuestionsFilter::default())
            .await
            .unwrap();

        assert_eq!(questions.len(), 1);
        assert_ne!(
            questions[0].question.question_id.as_uuid(),
            answered_id.as_uuid()
        );
    }

    #[tokio::test]
    async fn test_listing_caps_at_page_size() {
        let repo = MockRepo::new();
        let designer = UserId::new();
        let player = repo.add_player("alice");

        for _ in 0..15 {
            seed_question(&repo, &designer, None, 1).await;
        }

        let questions = list_use_case(&repo)
            .list(&player, ListQuestionsFilter::default())
            .await
            .unwrap();

        assert_eq!(questions.len(), 10);
    }
}

#[cfg(test)]
mod random_tests {
    use std::sync::Arc;

    use kernel::id::UserId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::support::MockRepo;
    use crate::application::{
        AuthoringUseCase, CreateQuestionInput, RandomQuestionUseCase, SubmitAnswerUseCase,
    };
    use crate::error::QuizError;

    async fn seed_questions(repo: &MockRepo, count: usize) -> Vec<kernel::id::QuestionId> {
        let designer = UserId::new();
        let uc = AuthoringUseCase::new(Arc::new(repo.clone()));
        let mut ids = Vec::new();
        for i in 0..count {
            let created = uc
                .create(
                    &designer,
                    CreateQuestionInput {
                        text: format!("q{i}"),
                        options: vec!["a".to_string(), "b".to_string()],
                        correct_answer: 0,
                        category_id: None,
                        difficulty: 1,
                    },
                )
                .await
                .unwrap();
            ids.push(created.question.question_id);
        }
        ids
    }

    #[tokio::test]
    async fn test_empty_pool_reports_no_more_questions() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");

        let mut rng = StdRng::seed_from_u64(1);
        let result = RandomQuestionUseCase::new(Arc::new(repo.clone()))
            .pick(&player, &mut rng)
            .await;

        assert!(matches!(result, Err(QuizError::NoMoreQuestions)));
    }

    #[tokio::test]
    async fn test_seeded_pick_is_deterministic() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");
        seed_questions(&repo, 20).await;

        let uc = RandomQuestionUseCase::new(Arc::new(repo.clone()));

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = uc.pick(&player, &mut rng_a).await.unwrap();
        let b = uc.pick(&player, &mut rng_b).await.unwrap();

        assert_eq!(
            a.question.question_id.as_uuid(),
            b.question.question_id.as_uuid()
        );
    }

    #[tokio::test]
    async fn test_pick_skips_answered_questions() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");
        let ids = seed_questions(&repo, 5).await;

        // Answer all but the last; only it can come back
        let submit = SubmitAnswerUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
        for id in &ids[..4] {
            submit.submit(&player, id, 0).await.unwrap();
        }

        let mut rng = StdRng::seed_from_u64(7);
        let picked = RandomQuestionUseCase::new(Arc::new(repo.clone()))
            .pick(&player, &mut rng)
            .await
            .unwrap();

        assert_eq!(picked.question.question_id.as_uuid(), ids[4].as_uuid());
    }
}

#[cfg(test)]
mod scoring_tests {
    use std::sync::Arc;

    use kernel::id::{QuestionId, UserId};

    use super::support::MockRepo;
    use crate::application::{AuthoringUseCase, CreateQuestionInput, SubmitAnswerUseCase};
    use crate::error::QuizError;

    async fn seed_question(repo: &MockRepo, difficulty: i16) -> QuestionId {
        AuthoringUseCase::new(Arc::new(repo.clone()))
            .create(
                &UserId::new(),
                CreateQuestionInput {
                    text: "q".to_string(),
                    options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    correct_answer: 1,
                    category_id: None,
                    difficulty,
                },
            )
            .await
            .unwrap()
            .question
            .question_id
    }

    fn use_case(repo: &MockRepo) -> SubmitAnswerUseCase<MockRepo, MockRepo> {
        SubmitAnswerUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn test_correct_answer_awards_difficulty_points() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");
        let question_id = seed_question(&repo, 3).await;

        let output = use_case(&repo)
            .submit(&player, &question_id, 1)
            .await
            .unwrap();

        assert!(output.correct);
        assert_eq!(output.points_earned, 30);
        assert_eq!(output.feedback, "Correct answer!");
        assert_eq!(repo.points_of(&player), 30);
    }

    #[tokio::test]
    async fn test_wrong_answer_awards_nothing() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");
        let question_id = seed_question(&repo, 5).await;

        let output = use_case(&repo)
            .submit(&player, &question_id, 0)
            .await
            .unwrap();

        assert!(!output.correct);
        assert_eq!(output.points_earned, 0);
        assert_eq!(output.feedback, "Wrong answer.");
        assert_eq!(repo.points_of(&player), 0);
    }

    #[tokio::test]
    async fn test_points_scale_with_difficulty() {
        for difficulty in 1..=5i16 {
            let repo = MockRepo::new();
            let player = repo.add_player("alice");
            let question_id = seed_question(&repo, difficulty).await;

            let output = use_case(&repo)
                .submit(&player, &question_id, 1)
                .await
                .unwrap();
            assert_eq!(output.points_earned, 10 * difficulty as i64);
        }
    }

    #[tokio::test]
    async fn test_double_submit_rejected_and_points_unchanged() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");
        let question_id = seed_question(&repo, 2).await;
        let uc = use_case(&repo);

        uc.submit(&player, &question_id, 1).await.unwrap();
        let result = uc.submit(&player, &question_id, 1).await;

        assert!(matches!(result, Err(QuizError::AlreadyAnswered)));
        assert_eq!(repo.points_of(&player), 20);
    }

    #[tokio::test]
    async fn test_wrong_answer_still_consumes_the_question() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");
        let question_id = seed_question(&repo, 2).await;
        let uc = use_case(&repo);

        uc.submit(&player, &question_id, 0).await.unwrap();
        // No second chance after a miss
        let result = uc.submit(&player, &question_id, 1).await;

        assert!(matches!(result, Err(QuizError::AlreadyAnswered)));
        assert_eq!(repo.points_of(&player), 0);
    }

    #[tokio::test]
    async fn test_out_of_bounds_answer_rejected() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");
        let question_id = seed_question(&repo, 1).await;

        let result = use_case(&repo).submit(&player, &question_id, 9).await;
        assert!(matches!(
            result,
            Err(QuizError::InvalidAnswer { index: 9, len: 3 })
        ));
        // A rejected submission does not consume the question
        assert!(
            use_case(&repo)
                .submit(&player, &question_id, 1)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_missing_question_not_found() {
        let repo = MockRepo::new();
        let player = repo.add_player("alice");

        let result = use_case(&repo).submit(&player, &QuestionId::new(), 0).await;
        assert!(matches!(result, Err(QuizError::QuestionNotFound)));
    }
}

#[cfg(test)]
mod leaderboard_tests {
    use std::sync::Arc;

    use super::support::MockRepo;
    use crate::application::LeaderboardUseCase;
    use crate::application::config::QuizConfig;

    fn use_case(repo: &MockRepo) -> LeaderboardUseCase<MockRepo> {
        LeaderboardUseCase::new(Arc::new(repo.clone()), Arc::new(QuizConfig::default()))
    }

    #[tokio::test]
    async fn test_orders_by_points_descending() {
        let repo = MockRepo::new();
        let alice = repo.add_player("alice");
        let bob = repo.add_player("bob");
        let carol = repo.add_player("carol");
        repo.set_points(&alice, 30);
        repo.set_points(&bob, 50);
        repo.set_points(&carol, 10);

        let top = use_case(&repo).top().await.unwrap();
        let handles: Vec<&str> = top.iter().map(|e| e.handle.as_str()).collect();
        assert_eq!(handles, vec!["bob", "alice", "carol"]);
    }

    #[tokio::test]
    async fn test_ties_break_by_registration_order() {
        let repo = MockRepo::new();
        let first = repo.add_player("first");
        let second = repo.add_player("second");
        repo.set_points(&first, 40);
        repo.set_points(&second, 40);

        let top = use_case(&repo).top().await.unwrap();
        assert_eq!(top[0].handle, "first");
        assert_eq!(top[1].handle, "second");
    }

    #[tokio::test]
    async fn test_caps_at_configured_size() {
        let repo = MockRepo::new();
        for i in 0..15 {
            let id = repo.add_player(&format!("player{i}"));
            repo.set_points(&id, i);
        }

        let top = use_case(&repo).top().await.unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].points, 14);
    }

    #[tokio::test]
    async fn test_designers_are_excluded() {
        let repo = MockRepo::new();
        let designer = repo.add_designer("maker");
        repo.set_points(&designer, 999);
        let player = repo.add_player("alice");
        repo.set_points(&player, 5);

        let top = use_case(&repo).top().await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].handle, "alice");
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use kernel::id::UserId;
    use platform::token::{self, TokenClaims};
    use serde_json::json;
    use tower::ServiceExt;
    use users::config::AuthConfig;

    use super::support::MockRepo;
    use crate::application::config::QuizConfig;
    use crate::application::{AuthoringUseCase, CreateQuestionInput};
    use crate::presentation::router::{designer_router_generic, player_router_generic};

    fn bearer(config: &AuthConfig, user_id: &UserId, role: &str) -> String {
        let claims = TokenClaims::new(
            user_id.into_uuid(),
            role,
            Utc::now(),
            config.token_ttl_chrono(),
        );
        token::issue(&claims, &config.token_secret).unwrap()
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> StatusCode {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
            .status()
    }

    async fn seed_question(repo: &MockRepo) -> kernel::id::QuestionId {
        AuthoringUseCase::new(Arc::new(repo.clone()))
            .create(
                &UserId::new(),
                CreateQuestionInput {
                    text: "q".to_string(),
                    options: vec!["a".to_string(), "b".to_string()],
                    correct_answer: 1,
                    category_id: None,
                    difficulty: 3,
                },
            )
            .await
            .unwrap()
            .question
            .question_id
    }

    #[tokio::test]
    async fn test_player_routes_require_bearer_token() {
        let repo = MockRepo::new();
        let router =
            player_router_generic(repo, QuizConfig::default(), AuthConfig::development());

        let status = send(&router, "GET", "/leaderboard", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_designer_token_rejected_on_player_routes() {
        let repo = MockRepo::new();
        let config = AuthConfig::development();
        let router = player_router_generic(repo, QuizConfig::default(), config.clone());
        let token = bearer(&config, &UserId::new(), "designer");

        let status = send(&router, "GET", "/leaderboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_submit_answer_over_http() {
        let repo = MockRepo::new();
        let config = AuthConfig::development();
        let player = repo.add_player("alice");
        let question_id = seed_question(&repo).await;
        let router = player_router_generic(repo.clone(), QuizConfig::default(), config.clone());
        let token = bearer(&config, &player, "player");

        let status = send(
            &router,
            "POST",
            &format!("/questions/{question_id}/answer"),
            Some(&token),
            Some(json!({ "answer": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(repo.points_of(&player), 30);
    }

    #[tokio::test]
    async fn test_create_question_over_http() {
        let repo = MockRepo::new();
        let config = AuthConfig::development();
        let designer = UserId::new();
        let router = designer_router_generic(repo.clone(), QuizConfig::default(), config.clone());
        let token = bearer(&config, &designer, "designer");

        let status = send(
            &router,
            "POST",
            "/questions",
            Some(&token),
            Some(json!({
                "text": "What is 2+2?",
                "options": ["3", "4"],
                "correctAnswer": 1,
                "difficulty": 2
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }
}
