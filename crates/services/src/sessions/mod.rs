mod progress;
mod service;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use progress::{OptionFeedback, SessionPhase, SessionProgress};
pub use service::{AnswerFeedback, QuizSession, Step};
pub use workflow::{AdvanceOutcome, CompletionReport, QuizEngine, SaveStatus};
