//! Category Entity

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, UserId};

/// Question category
///
/// Names are free-form and not unique; the original data model allowed
/// duplicates and the filter resolves by exact name match.
#[derive(Debug, Clone)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    /// Authoring designer; fixed at creation
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: String, creator_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            category_id: CategoryId::new(),
            name,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the category
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}
