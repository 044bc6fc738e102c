//! Difficulty Value Object
//!
//! Integer difficulty in 1..=5; a correct answer earns `10 * difficulty`
//! points.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QuizError;

/// Minimum difficulty
pub const DIFFICULTY_MIN: i16 = 1;

/// Maximum difficulty
pub const DIFFICULTY_MAX: i16 = 5;

/// Points awarded per difficulty level for a correct answer
const POINTS_PER_LEVEL: i64 = 10;

/// Validated question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Difficulty(i16);

impl Difficulty {
    /// Create a difficulty, rejecting values outside 1..=5
    pub fn new(value: i16) -> Result<Self, QuizError> {
        if !(DIFFICULTY_MIN..=DIFFICULTY_MAX).contains(&value) {
            return Err(QuizError::InvalidDifficulty(value));
        }
        Ok(Self(value))
    }

    /// Raw difficulty level
    #[inline]
    pub const fn value(&self) -> i16 {
        self.0
    }

    /// Points earned by a correct answer at this difficulty
    #[inline]
    pub const fn points(&self) -> i64 {
        POINTS_PER_LEVEL * self.0 as i64
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i16> for Difficulty {
    type Error = QuizError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for i16 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}
