use quiz_core::model::Difficulty;
use services::{OptionFeedback, QuizEngine, QuizSession, SessionError};

use crate::vm::results_vm::ResultsVm;

/// User actions on the quiz screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start(Difficulty),
    Pick(usize),
    Next,
    Restart,
    RetrySave,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The action needs a quiz in progress.
    NoSession,
    /// The action does not apply to the current screen.
    NotAllowed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NoSession => "Pick a difficulty to start a quiz.",
            ViewError::NotAllowed => "That action is not available right now.",
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoActiveSession => ViewError::NoSession,
            _ => ViewError::NotAllowed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub feedback: OptionFeedback,
    pub selected: bool,
}

/// Question screen. Controls that would break the session contract are
/// reported as disabled through `can_pick`/`can_advance`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub difficulty: Difficulty,
    pub position_label: String,
    pub category: String,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub explanation: Option<String>,
    pub can_pick: bool,
    pub can_advance: bool,
    pub next_label: String,
}

impl QuestionVm {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let progress = session.progress();
        let revealed = progress.is_revealed();
        let selected = session.selected_option();

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(i, label)| OptionVm {
                label: label.clone(),
                feedback: session.feedback_for(i),
                selected: selected == Some(i),
            })
            .collect();

        let next_label = if progress.position == progress.total {
            "See results"
        } else {
            "Next question"
        };

        Some(Self {
            difficulty: session.difficulty(),
            position_label: format!("Question {} of {}", progress.position, progress.total),
            category: question.category().to_owned(),
            prompt: question.prompt().to_owned(),
            options,
            explanation: revealed.then(|| question.explanation().to_owned()),
            can_pick: !revealed,
            can_advance: revealed,
            next_label: next_label.to_owned(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    TierSelect,
    Question(QuestionVm),
    Results(ResultsVm),
}

/// Thin adapter from user intents to engine calls.
pub struct QuizVm {
    engine: QuizEngine,
}

impl QuizVm {
    #[must_use]
    pub fn new(engine: QuizEngine) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    /// The screen matching the engine's current state.
    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        let Some(session) = self.engine.session() else {
            return QuizScreen::TierSelect;
        };
        if let Some(report) = self.engine.last_completion() {
            return QuizScreen::Results(ResultsVm::from(report));
        }
        QuestionVm::from_session(session).map_or(QuizScreen::TierSelect, QuizScreen::Question)
    }

    /// Apply an intent and return the screen to show next.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` if the intent is not valid for the current state;
    /// the state is left unchanged in that case.
    pub async fn handle(&mut self, intent: QuizIntent) -> Result<QuizScreen, ViewError> {
        match intent {
            QuizIntent::Start(difficulty) => {
                self.engine.start_session(difficulty);
            }
            QuizIntent::Pick(option) => {
                self.engine.submit_answer(option)?;
            }
            QuizIntent::Next => {
                self.engine.advance().await?;
            }
            QuizIntent::Restart => {
                let difficulty = self
                    .engine
                    .session()
                    .map(QuizSession::difficulty)
                    .ok_or(ViewError::NoSession)?;
                self.engine.start_session(difficulty);
            }
            QuizIntent::RetrySave => {
                self.engine.retry_save().await?;
            }
            QuizIntent::Quit => self.engine.reset(),
        }
        Ok(self.screen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use services::AppServices;

    fn vm() -> QuizVm {
        QuizVm::new(AppServices::in_memory(fixed_clock()).unwrap().quiz_engine())
    }

    #[tokio::test]
    async fn starts_on_tier_select() {
        let mut vm = vm();
        assert_eq!(vm.screen(), QuizScreen::TierSelect);
        assert_eq!(vm.handle(QuizIntent::Next).await, Err(ViewError::NoSession));
        assert_eq!(vm.handle(QuizIntent::Restart).await, Err(ViewError::NoSession));
    }

    #[tokio::test]
    async fn pick_reveals_feedback_and_disables_options() {
        let mut vm = vm();
        vm.handle(QuizIntent::Start(Difficulty::Easy)).await.unwrap();
        let QuizScreen::Question(before) = vm.screen() else {
            panic!("expected question screen");
        };
        assert_eq!(before.position_label, "Question 1 of 10");
        assert!(before.can_pick && !before.can_advance);
        assert_eq!(before.explanation, None);

        let QuizScreen::Question(after) = vm.handle(QuizIntent::Pick(0)).await.unwrap() else {
            panic!("expected question screen");
        };
        assert!(!after.can_pick && after.can_advance);
        assert!(after.explanation.is_some());
        assert!(after.options[0].selected);
        assert_eq!(after.options[0].feedback, OptionFeedback::WrongPick);
        assert_eq!(after.options[1].feedback, OptionFeedback::Correct);

        assert_eq!(vm.handle(QuizIntent::Pick(1)).await, Err(ViewError::NotAllowed));
    }

    #[tokio::test]
    async fn quit_returns_to_tier_select() {
        let mut vm = vm();
        vm.handle(QuizIntent::Start(Difficulty::Hard)).await.unwrap();
        assert_eq!(vm.handle(QuizIntent::Quit).await, Ok(QuizScreen::TierSelect));
    }
}
