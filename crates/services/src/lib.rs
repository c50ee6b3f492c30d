#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod sessions;
pub mod stats_service;

pub use quiz_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use error::{AppServicesError, SessionError, StatsError};
pub use stats_service::{SavePolicy, StatsService};

pub use sessions::{
    AdvanceOutcome, AnswerFeedback, CompletionReport, OptionFeedback, QuizEngine, QuizSession,
    SaveStatus, SessionPhase, SessionProgress,
};
