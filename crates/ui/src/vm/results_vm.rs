use quiz_core::model::QuizResult;
use services::{CompletionReport, SaveStatus};

/// Results screen for a finished attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub percentage_label: String,
    pub is_perfect: bool,
    pub headline: String,
    /// Shown when the stored result differs from this attempt.
    pub stored_label: Option<String>,
    pub save_notice: Option<String>,
}

impl From<&CompletionReport> for ResultsVm {
    fn from(report: &CompletionReport) -> Self {
        let result = &report.result;
        let (stored_label, save_notice) = match &report.save {
            SaveStatus::Saved(kept) if kept != result => {
                (Some(format!("Best kept: {}%", kept.percentage())), None)
            }
            SaveStatus::Saved(_) => (None, None),
            SaveStatus::Failed(notice) => (None, Some(notice.clone())),
        };
        Self {
            score_label: format!("{}/{}", result.score(), result.total_questions()),
            percentage_label: format!("{}%", result.percentage()),
            is_perfect: result.is_perfect(),
            headline: headline(result).to_owned(),
            stored_label,
            save_notice,
        }
    }
}

fn headline(result: &QuizResult) -> &'static str {
    match result.percentage() {
        100 => "Perfect score!",
        80..=99 => "Great job!",
        50..=79 => "Good effort.",
        _ => "Keep practicing.",
    }
}
