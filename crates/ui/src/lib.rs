//! Presentation-agnostic view models for the quiz screens.

pub mod vm;

pub use vm::{
    OptionVm, QuestionVm, QuizIntent, QuizScreen, QuizVm, ResultsVm, StatsVm, TierCardVm,
    ViewError, load_stats, load_tier_cards, map_stats, map_tier_cards,
};
