//! Application Configuration
//!
//! Configuration for the Quiz application layer.

/// Quiz application configuration
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// Maximum questions returned by a player listing
    pub page_size: i64,
    /// Rows on the leaderboard
    pub leaderboard_size: i64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            leaderboard_size: 10,
        }
    }
}
