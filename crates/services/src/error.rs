//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::bank::BankError;
use quiz_core::model::{QuestionId, ResultError};
use storage::repository::StorageError;
use storage::results::CodecError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `StatsService` writes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Contract violations raised by the quiz session engine.
///
/// A rejected call never changes session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no quiz session is active")]
    NoActiveSession,
    #[error("question {question_id} was already answered")]
    AlreadyAnswered { question_id: QuestionId },
    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("answer the current question before advancing")]
    NotRevealed,
    #[error("quiz session already completed")]
    Completed,
    #[error("quiz session is not completed yet")]
    NotCompleted,
    #[error(transparent)]
    Result(#[from] ResultError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Bank(#[from] BankError),
}
