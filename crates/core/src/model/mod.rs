mod difficulty;
mod ids;
mod question;
mod result;

pub use difficulty::{Difficulty, DifficultyError};
pub use ids::QuestionId;
pub use question::{Question, QuestionDraft, QuestionError};
pub use result::{QuizResult, ResultError, ResultsByDifficulty, StatsAggregate, percentage_of};
