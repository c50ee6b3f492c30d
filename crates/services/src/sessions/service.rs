use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use quiz_core::model::{Difficulty, Question, QuestionId, QuizResult};

use super::progress::{OptionFeedback, SessionPhase, SessionProgress};
use crate::error::SessionError;

//
// ─── ANSWER FEEDBACK ───────────────────────────────────────────────────────────
//

/// What the learner sees right after submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// Result of advancing past a revealed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Moved on to the next question.
    Next,
    /// That was the last question; holds the scored attempt.
    Finished(QuizResult),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One in-memory quiz attempt over a tier's questions.
///
/// Steps through the questions in order. Each question is answered at most
/// once, then revealed, then left behind by `advance`. Never persisted.
pub struct QuizSession {
    difficulty: Difficulty,
    questions: Arc<[Question]>,
    current: usize,
    answers: BTreeMap<QuestionId, usize>,
    revealed: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start an attempt at question 0 with no answers.
    ///
    /// `questions` must be non-empty; banks guarantee this for every tier.
    #[must_use]
    pub fn new(
        difficulty: Difficulty,
        questions: Arc<[Question]>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            difficulty,
            questions,
            current: 0,
            answers: BTreeMap::new(),
            revealed: false,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, usize> {
        &self.answers
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_complete() {
            SessionPhase::Completed
        } else if self.revealed {
            SessionPhase::Revealed
        } else {
            SessionPhase::Answering
        }
    }

    /// The question being answered or revealed; `None` once completed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// The learner's pick for the current question, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        let question = self.current_question()?;
        self.answers.get(&question.id()).copied()
    }

    /// Count of answers matching their question's correct option.
    ///
    /// Unanswered questions count as incorrect.
    #[must_use]
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| {
                self.answers
                    .get(&q.id())
                    .is_some_and(|&picked| q.is_correct(picked))
            })
            .count()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            difficulty: self.difficulty,
            position: self.current + 1,
            total: self.questions.len(),
            answered: self.answers.len(),
            correct: self.score(),
            phase: self.phase(),
        }
    }

    /// Presentation state of one option of the current question.
    ///
    /// Everything is `Neutral` until the answer is revealed.
    #[must_use]
    pub fn feedback_for(&self, option: usize) -> OptionFeedback {
        let (Some(question), Some(picked)) = (self.current_question(), self.selected_option())
        else {
            return OptionFeedback::Neutral;
        };
        if !self.revealed {
            return OptionFeedback::Neutral;
        }
        if question.is_correct(option) {
            OptionFeedback::Correct
        } else if option == picked {
            OptionFeedback::WrongPick
        } else {
            OptionFeedback::Neutral
        }
    }

    /// Feedback for every option of the current question, in option order.
    #[must_use]
    pub fn option_feedback(&self) -> Vec<OptionFeedback> {
        let count = self.current_question().map_or(0, Question::option_count);
        (0..count).map(|i| self.feedback_for(i)).collect()
    }

    /// Record the learner's pick for the current question and reveal it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the last question was scored,
    /// `SessionError::AlreadyAnswered` if this question already has a pick, or
    /// `SessionError::OptionOutOfRange` for an invalid option index.
    pub fn submit_answer(&mut self, option: usize) -> Result<AnswerFeedback, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::Completed);
        };
        if self.revealed || self.answers.contains_key(&question.id()) {
            return Err(SessionError::AlreadyAnswered {
                question_id: question.id(),
            });
        }
        if option >= question.option_count() {
            return Err(SessionError::OptionOutOfRange {
                index: option,
                len: question.option_count(),
            });
        }

        self.answers.insert(question.id(), option);
        self.revealed = true;

        Ok(AnswerFeedback {
            question_id: question.id(),
            selected: option,
            correct_answer: question.correct_answer(),
            is_correct: question.is_correct(option),
            explanation: question.explanation().to_owned(),
        })
    }

    /// Leave the revealed question: move to the next one, or score the attempt
    /// when it was the last.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if already scored, or
    /// `SessionError::NotRevealed` if the current question is unanswered.
    /// The session is unchanged when an error is returned.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Step, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if !self.revealed {
            return Err(SessionError::NotRevealed);
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.revealed = false;
            return Ok(Step::Next);
        }

        let score = u32::try_from(self.score()).unwrap_or(u32::MAX);
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let result = QuizResult::from_score(self.difficulty, score, total, now)?;
        self.completed_at = Some(now);
        Ok(Step::Finished(result))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("difficulty", &self.difficulty)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("revealed", &self.revealed)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
