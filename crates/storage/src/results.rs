//! JSON layout of the persisted results mapping.
//!
//! The whole mapping lives under one key as `{ "<tier>": ResultRecord, ... }`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quiz_core::model::{Difficulty, DifficultyError, QuizResult, ResultError, ResultsByDifficulty};

/// Fixed storage key for the results mapping.
pub const STATS_STORAGE_KEY: &str = "cli-quiz-results";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Difficulty(#[from] DifficultyError),

    #[error(transparent)]
    Result(#[from] ResultError),

    #[error("entry stored under {key} names difficulty {difficulty}")]
    KeyMismatch { key: Difficulty, difficulty: Difficulty },
}

/// Persisted shape of a `QuizResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub difficulty: Difficulty,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u8,
    pub completed_at: DateTime<Utc>,
    pub is_perfect: bool,
}

impl ResultRecord {
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        Self {
            difficulty: result.difficulty(),
            score: result.score(),
            total_questions: result.total_questions(),
            percentage: result.percentage(),
            completed_at: result.completed_at(),
            is_perfect: result.is_perfect(),
        }
    }

    /// Convert the record back into a domain `QuizResult`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Result` if the numbers break a result invariant.
    pub fn into_result(self) -> Result<QuizResult, CodecError> {
        Ok(QuizResult::from_persisted(
            self.difficulty,
            self.score,
            self.total_questions,
            self.percentage,
            self.completed_at,
            self.is_perfect,
        )?)
    }
}

/// Serialize the results mapping to its stored JSON form.
///
/// # Errors
///
/// Returns `CodecError::Json` if serialization fails.
pub fn encode_results(results: &ResultsByDifficulty) -> Result<String, CodecError> {
    let records: BTreeMap<&str, ResultRecord> = results
        .iter()
        .map(|(difficulty, result)| (difficulty.as_str(), ResultRecord::from_result(result)))
        .collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse the stored JSON form.
///
/// The document must be a JSON object. Individual entries that are unreadable
/// are skipped with a warning so one bad tier does not hide the others.
///
/// # Errors
///
/// Returns `CodecError::Json` if the document is not a JSON object.
pub fn decode_results(raw: &str) -> Result<ResultsByDifficulty, CodecError> {
    let entries: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)?;
    let mut results = ResultsByDifficulty::new();

    for (key, value) in entries {
        match decode_entry(&key, value) {
            Ok(result) => {
                results.insert(result.difficulty(), result);
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "skipping unreadable stored result");
            }
        }
    }

    Ok(results)
}

fn decode_entry(key: &str, value: serde_json::Value) -> Result<QuizResult, CodecError> {
    let key = key.parse::<Difficulty>()?;
    let record: ResultRecord = serde_json::from_value(value)?;
    let result = record.into_result()?;
    if result.difficulty() != key {
        return Err(CodecError::KeyMismatch {
            key,
            difficulty: result.difficulty(),
        });
    }
    Ok(result)
}
