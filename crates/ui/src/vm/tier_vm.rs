use quiz_core::QuestionBank;
use quiz_core::model::{Difficulty, ResultsByDifficulty};
use services::StatsService;

/// Tier picker entry: catalog metadata plus the stored result badges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierCardVm {
    pub difficulty: Difficulty,
    pub name: String,
    pub description: String,
    pub count_label: String,
    pub completed: bool,
    pub perfect: bool,
    pub last_score_label: Option<String>,
}

#[must_use]
pub fn map_tier_cards(bank: &QuestionBank, results: &ResultsByDifficulty) -> Vec<TierCardVm> {
    bank.catalog()
        .map(|info| {
            let result = results.get(&info.difficulty);
            TierCardVm {
                difficulty: info.difficulty,
                name: info.name.clone(),
                description: info.description.clone(),
                count_label: format!("{} questions", info.expected_count),
                completed: result.is_some(),
                perfect: result.is_some_and(|r| r.is_perfect()),
                last_score_label: result.map(|r| format!("Last: {}%", r.percentage())),
            }
        })
        .collect()
}

/// Read the stored results and build the tier picker.
pub async fn load_tier_cards(bank: &QuestionBank, stats: &StatsService) -> Vec<TierCardVm> {
    let results = stats.get_all_results().await;
    map_tier_cards(bank, &results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizResult;
    use quiz_core::time::fixed_now;

    #[test]
    fn cards_follow_catalog_and_show_badges() {
        let bank = QuestionBank::builtin().unwrap();
        let mut results = ResultsByDifficulty::new();
        results.insert(
            Difficulty::Easy,
            QuizResult::from_score(Difficulty::Easy, 10, 10, fixed_now()).unwrap(),
        );
        results.insert(
            Difficulty::Hard,
            QuizResult::from_score(Difficulty::Hard, 10, 15, fixed_now()).unwrap(),
        );

        let cards = map_tier_cards(&bank, &results);

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].name, "Easy");
        assert_eq!(cards[0].count_label, "10 questions");
        assert!(cards[0].completed && cards[0].perfect);
        assert!(!cards[1].completed);
        assert_eq!(cards[1].last_score_label, None);
        assert!(cards[2].completed && !cards[2].perfect);
        assert_eq!(cards[2].last_score_label.as_deref(), Some("Last: 67%"));
        assert_eq!(cards[3].count_label, "18 questions");
    }
}
