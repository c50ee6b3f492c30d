use std::sync::Arc;

use quiz_core::QuestionBank;
use quiz_core::model::{Difficulty, Question, QuizResult};

use super::progress::{OptionFeedback, SessionProgress};
use super::service::{AnswerFeedback, QuizSession, Step};
use crate::Clock;
use crate::error::SessionError;
use crate::stats_service::StatsService;

/// Whether a completed attempt reached the stats store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    /// Persisted; holds the result now stored for the tier.
    Saved(QuizResult),
    /// Persistence failed; holds a notice for the UI. The attempt still counts.
    Failed(String),
}

/// Outcome of a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    /// This attempt's score, independent of what the store kept.
    pub result: QuizResult,
    pub save: SaveStatus,
}

impl CompletionReport {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self.save, SaveStatus::Saved(_))
    }
}

/// Result of `QuizEngine::advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next(SessionProgress),
    Completed(CompletionReport),
}

/// Drives a single quiz attempt and records its score on completion.
///
/// Holds at most one session. Starting a new one or calling `reset` drops the
/// current attempt without saving anything. The only write to the stats store
/// happens when `advance` leaves the last question.
pub struct QuizEngine {
    clock: Clock,
    bank: Arc<QuestionBank>,
    stats: Arc<StatsService>,
    session: Option<QuizSession>,
    completion: Option<CompletionReport>,
}

impl QuizEngine {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>, stats: Arc<StatsService>) -> Self {
        Self {
            clock,
            bank,
            stats,
            session: None,
            completion: None,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn stats(&self) -> &StatsService {
        &self.stats
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Begin a fresh attempt at `difficulty`, discarding any attempt in progress.
    pub fn start_session(&mut self, difficulty: Difficulty) -> SessionProgress {
        if let Some(previous) = self.session.as_ref().filter(|s| !s.is_complete()) {
            tracing::debug!(
                difficulty = %previous.difficulty(),
                answered = previous.answers().len(),
                "discarding unfinished quiz session"
            );
        }

        let tier = self.bank.tier(difficulty);
        let session = QuizSession::new(difficulty, tier.shared_questions(), self.clock.now());
        let progress = session.progress();
        tracing::info!(difficulty = %difficulty, total = progress.total, "quiz session started");

        self.session = Some(session);
        self.completion = None;
        progress
    }

    /// Drop the active session, leaving saved stats untouched.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("quiz session reset");
        }
        self.completion = None;
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` without a session, otherwise any
    /// contract error from `QuizSession::submit_answer`.
    pub fn submit_answer(&mut self, option: usize) -> Result<AnswerFeedback, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let feedback = session.submit_answer(option)?;
        tracing::debug!(
            question = %feedback.question_id,
            selected = feedback.selected,
            correct = feedback.is_correct,
            "answer recorded"
        );
        Ok(feedback)
    }

    /// Move past the revealed question. On the last question, score the
    /// attempt and save it through the stats store.
    ///
    /// A failed save is reported in the `CompletionReport`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession`, `SessionError::NotRevealed` or
    /// `SessionError::Completed` when called out of order.
    pub async fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let now = self.clock.now();

        let result = match session.advance(now)? {
            Step::Next => return Ok(AdvanceOutcome::Next(session.progress())),
            Step::Finished(result) => result,
        };

        tracing::info!(
            difficulty = %result.difficulty(),
            score = result.score(),
            total = result.total_questions(),
            percentage = result.percentage(),
            "quiz session completed"
        );

        let save = self.save(&result).await;
        let report = CompletionReport { result, save };
        self.completion = Some(report.clone());
        Ok(AdvanceOutcome::Completed(report))
    }

    /// Try again to persist a completed attempt whose save failed.
    ///
    /// Does nothing if the attempt is already saved.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` or `SessionError::NotCompleted`
    /// when there is no finished attempt to save.
    pub async fn retry_save(&mut self) -> Result<CompletionReport, SessionError> {
        if self.session.is_none() {
            return Err(SessionError::NoActiveSession);
        }
        let Some(report) = self.completion.clone() else {
            return Err(SessionError::NotCompleted);
        };
        if report.is_saved() {
            return Ok(report);
        }

        let save = self.save(&report.result).await;
        let report = CompletionReport {
            result: report.result,
            save,
        };
        self.completion = Some(report.clone());
        Ok(report)
    }

    /// Report of the finished attempt, if the active session is completed.
    #[must_use]
    pub fn last_completion(&self) -> Option<&CompletionReport> {
        self.completion.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref()?.current_question()
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session.as_ref().map(QuizSession::progress)
    }

    #[must_use]
    pub fn option_feedback(&self) -> Vec<OptionFeedback> {
        self.session
            .as_ref()
            .map(QuizSession::option_feedback)
            .unwrap_or_default()
    }

    async fn save(&self, result: &QuizResult) -> SaveStatus {
        match self.stats.record(result.clone()).await {
            Ok(retained) => SaveStatus::Saved(retained),
            Err(err) => {
                tracing::warn!(
                    difficulty = %result.difficulty(),
                    error = %err,
                    "could not save quiz result"
                );
                SaveStatus::Failed(format!("Your score could not be saved: {err}"))
            }
        }
    }
}
