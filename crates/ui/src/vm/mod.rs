mod quiz_vm;
mod results_vm;
mod stats_vm;
mod tier_vm;
mod time_fmt;

pub use quiz_vm::{OptionVm, QuestionVm, QuizIntent, QuizScreen, QuizVm, ViewError};
pub use results_vm::ResultsVm;
pub use stats_vm::{StatsVm, load_stats, map_stats};
pub use tier_vm::{TierCardVm, load_tier_cards, map_tier_cards};
pub use time_fmt::format_datetime;
