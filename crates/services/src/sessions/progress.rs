use quiz_core::model::Difficulty;

/// Where a session sits in its answer/reveal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Current question is waiting for an answer.
    Answering,
    /// Current question was answered and its explanation is showing.
    Revealed,
    /// Every question was answered and the attempt was scored.
    Completed,
}

/// How a single option should be presented once the answer is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFeedback {
    Neutral,
    Correct,
    WrongPick,
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub difficulty: Difficulty,
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub phase: SessionPhase,
}

impl SessionProgress {
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, SessionPhase::Revealed)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, SessionPhase::Completed)
    }
}
