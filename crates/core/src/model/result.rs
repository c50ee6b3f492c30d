use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::Difficulty;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("total question count must be positive")]
    ZeroTotal,

    #[error("score {score} exceeds total {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("stored percentage {stored} does not match computed {computed}")]
    PercentageMismatch { stored: u8, computed: u8 },

    #[error("stored perfect flag does not match percentage")]
    PerfectMismatch,
}

/// Integer percentage of `score` over `total`, rounded half up.
///
/// `total` must be non-zero.
#[must_use]
pub fn percentage_of(score: u32, total: u32) -> u8 {
    let score = u64::from(score);
    let total = u64::from(total.max(1));
    let rounded = (200 * score + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(u8::MAX)
}

/// Outcome of one finished quiz attempt for a tier.
///
/// Invariants: `score <= total_questions`, `percentage == percentage_of(score, total)`
/// and `is_perfect` holds exactly when `percentage == 100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    difficulty: Difficulty,
    score: u32,
    total_questions: u32,
    percentage: u8,
    completed_at: DateTime<Utc>,
    is_perfect: bool,
}

impl QuizResult {
    /// Build a result from a raw score, deriving percentage and perfect flag.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::ZeroTotal` or `ResultError::ScoreExceedsTotal`.
    pub fn from_score(
        difficulty: Difficulty,
        score: u32,
        total_questions: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ResultError> {
        if total_questions == 0 {
            return Err(ResultError::ZeroTotal);
        }
        if score > total_questions {
            return Err(ResultError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }
        let percentage = percentage_of(score, total_questions);
        Ok(Self {
            difficulty,
            score,
            total_questions,
            percentage,
            completed_at,
            is_perfect: percentage == 100,
        })
    }

    /// Rehydrate a stored result, checking the derived fields still agree.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` when the stored fields break an invariant.
    pub fn from_persisted(
        difficulty: Difficulty,
        score: u32,
        total_questions: u32,
        percentage: u8,
        completed_at: DateTime<Utc>,
        is_perfect: bool,
    ) -> Result<Self, ResultError> {
        let result = Self::from_score(difficulty, score, total_questions, completed_at)?;
        if result.percentage != percentage {
            return Err(ResultError::PercentageMismatch {
                stored: percentage,
                computed: result.percentage,
            });
        }
        if result.is_perfect != is_perfect {
            return Err(ResultError::PerfectMismatch);
        }
        Ok(result)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.is_perfect
    }
}

/// Saved result per tier; at most one entry per difficulty.
pub type ResultsByDifficulty = BTreeMap<Difficulty, QuizResult>;

/// Totals derived from the saved result of every tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsAggregate {
    pub total_completed: usize,
    pub total_perfect: usize,
    /// Rounded mean percentage, 0 when nothing is saved.
    pub average_score: u8,
    pub last_completed: Option<DateTime<Utc>>,
}

impl StatsAggregate {
    #[must_use]
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a QuizResult>) -> Self {
        let mut aggregate = Self::default();
        let mut percentage_sum = 0_u32;

        for result in results {
            aggregate.total_completed += 1;
            if result.is_perfect() {
                aggregate.total_perfect += 1;
            }
            percentage_sum += u32::from(result.percentage());
            aggregate.last_completed = match aggregate.last_completed {
                Some(prev) if prev >= result.completed_at() => Some(prev),
                _ => Some(result.completed_at()),
            };
        }

        let count = u32::try_from(aggregate.total_completed).unwrap_or(u32::MAX);
        if count > 0 {
            aggregate.average_score = percentage_of(percentage_sum, count.saturating_mul(100));
        }
        aggregate
    }
}
