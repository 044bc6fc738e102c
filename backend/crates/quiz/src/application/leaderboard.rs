//! Leaderboard Use Case
//!
//! Top players by points. Ordering is fully deterministic: points
//! descending, then registration time, then user id.

use std::sync::Arc;

use crate::application::config::QuizConfig;
use crate::domain::repository::{LeaderboardEntry, PlayRepository};
use crate::error::QuizResult;

/// Leaderboard use case
pub struct LeaderboardUseCase<P>
where
    P: PlayRepository,
{
    play_repo: Arc<P>,
    config: Arc<QuizConfig>,
}

impl<P> LeaderboardUseCase<P>
where
    P: PlayRepository,
{
    pub fn new(play_repo: Arc<P>, config: Arc<QuizConfig>) -> Self {
        Self { play_repo, config }
    }

    /// Top players, capped at the configured size
    pub async fn top(&self) -> QuizResult<Vec<LeaderboardEntry>> {
        self.play_repo.top_players(self.config.leaderboard_size).await
    }
}
