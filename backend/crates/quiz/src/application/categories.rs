//! Category Management Use Case
//!
//! Designer-scoped CRUD over categories. Ownership works like questions:
//! someone else's category reads as not found.

use std::sync::Arc;

use kernel::id::{CategoryId, UserId};

use crate::domain::entity::category::Category;
use crate::domain::repository::CategoryRepository;
use crate::error::{QuizError, QuizResult};

/// Category management use case
pub struct CategoriesUseCase<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
}

impl<C> CategoriesUseCase<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    /// Create a category owned by `creator_id`
    pub async fn create(&self, creator_id: &UserId, name: String) -> QuizResult<Category> {
        let category = Category::new(name, *creator_id);
        self.category_repo.create(&category).await?;

        tracing::info!(
            category_id = %category.category_id,
            creator = %creator_id,
            "Category created"
        );

        Ok(category)
    }

    /// Fetch one of the caller's categories
    pub async fn get(&self, creator_id: &UserId, category_id: &CategoryId) -> QuizResult<Category> {
        self.find_owned(creator_id, category_id).await
    }

    /// List the caller's categories
    pub async fn list(&self, creator_id: &UserId) -> QuizResult<Vec<Category>> {
        self.category_repo.list_by_creator(creator_id).await
    }

    /// Rename one of the caller's categories
    pub async fn update(
        &self,
        creator_id: &UserId,
        category_id: &CategoryId,
        name: String,
    ) -> QuizResult<Category> {
        let mut category = self.find_owned(creator_id, category_id).await?;
        category.set_name(name);
        self.category_repo.update(&category).await?;
        Ok(category)
    }

    /// Delete one of the caller's categories
    ///
    /// Questions in the category survive; the store clears their
    /// category reference.
    pub async fn delete(&self, creator_id: &UserId, category_id: &CategoryId) -> QuizResult<()> {
        self.find_owned(creator_id, category_id).await?;
        self.category_repo.delete(category_id).await?;

        tracing::info!(category_id = %category_id, "Category deleted");
        Ok(())
    }

    async fn find_owned(
        &self,
        creator_id: &UserId,
        category_id: &CategoryId,
    ) -> QuizResult<Category> {
        self.category_repo
            .find_by_id(category_id)
            .await?
            .filter(|c| c.creator_id.as_uuid() == creator_id.as_uuid())
            .ok_or(QuizError::CategoryNotFound)
    }
}
