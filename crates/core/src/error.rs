use thiserror::Error;

use crate::bank::BankError;
use crate::model::{DifficultyError, QuestionError, ResultError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Result(#[from] ResultError),
}
