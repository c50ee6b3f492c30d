use quiz_core::model::{Difficulty, StatsAggregate};
use services::StatsService;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub completed_label: String,
    pub perfect_label: String,
    pub average_label: String,
    pub last_completed_label: Option<String>,
}

#[must_use]
pub fn map_stats(aggregate: &StatsAggregate) -> StatsVm {
    let tiers = Difficulty::ALL.len();
    StatsVm {
        completed_label: format!("{} of {tiers} tiers completed", aggregate.total_completed),
        perfect_label: format!("{} perfect", aggregate.total_perfect),
        average_label: format!("{}% average", aggregate.average_score),
        last_completed_label: aggregate.last_completed.map(format_datetime),
    }
}

pub async fn load_stats(stats: &StatsService) -> StatsVm {
    map_stats(&stats.get_aggregate().await)
}
