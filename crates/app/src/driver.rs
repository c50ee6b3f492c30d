//! Line-oriented terminal front end over the quiz view models.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use quiz_core::model::Difficulty;
use services::{AppServices, OptionFeedback};
use ui::{
    QuestionVm, QuizIntent, QuizScreen, QuizVm, ResultsVm, StatsVm, TierCardVm, load_stats,
    load_tier_cards,
};

pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next trimmed input line, `None` on end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    async fn read(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        println!("{prompt}");
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_owned()))
    }
}

pub fn print_tiers(cards: &[TierCardVm]) {
    for (i, card) in cards.iter().enumerate() {
        let badge = match (card.completed, card.perfect) {
            (_, true) => " [perfect]",
            (true, false) => " [done]",
            _ => "",
        };
        let last = card
            .last_score_label
            .as_deref()
            .map(|l| format!(" ({l})"))
            .unwrap_or_default();
        println!("  {}. {}{badge}{last}", i + 1, card.name);
        println!("     {} {}", card.count_label, card.description);
    }
}

pub fn print_stats(stats: &StatsVm) {
    println!("  {}", stats.completed_label);
    println!("  {}", stats.perfect_label);
    println!("  {}", stats.average_label);
    if let Some(last) = &stats.last_completed_label {
        println!("  Last completed: {last}");
    }
}

fn print_question(question: &QuestionVm) {
    println!();
    println!("{} [{}]", question.position_label, question.category);
    println!("{}", question.prompt);
    for (i, option) in question.options.iter().enumerate() {
        let marker = match option.feedback {
            OptionFeedback::Correct => "+",
            OptionFeedback::WrongPick => "x",
            OptionFeedback::Neutral => " ",
        };
        println!("  {marker} {}) {}", i + 1, option.label);
    }
    if let Some(explanation) = &question.explanation {
        println!("  {explanation}");
    }
}

fn print_results(results: &ResultsVm) {
    println!();
    println!("{}", results.headline);
    println!("  Score: {} ({})", results.score_label, results.percentage_label);
    if let Some(stored) = &results.stored_label {
        println!("  {stored}");
    }
    if let Some(notice) = &results.save_notice {
        println!("  ! {notice}");
    }
}

/// Translate one line of input into an intent for the current screen.
fn parse_intent(screen: &QuizScreen, input: &str) -> Option<QuizIntent> {
    match (screen, input) {
        (_, "q") => Some(QuizIntent::Quit),
        (QuizScreen::Question(q), "") if q.can_advance => Some(QuizIntent::Next),
        (QuizScreen::Question(q), digits) if q.can_pick => digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&i| i < q.options.len())
            .map(QuizIntent::Pick),
        (QuizScreen::Results(_), "r") => Some(QuizIntent::Restart),
        (QuizScreen::Results(r), "s") if r.save_notice.is_some() => Some(QuizIntent::RetrySave),
        (QuizScreen::Results(_), "" | "m") => Some(QuizIntent::Quit),
        _ => None,
    }
}

fn prompt_for(screen: &QuizScreen) -> &'static str {
    match screen {
        QuizScreen::Question(q) if q.can_pick => "Your answer (number), q to quit:",
        QuizScreen::Question(_) => "Press Enter to continue, q to quit:",
        QuizScreen::Results(r) if r.save_notice.is_some() => {
            "r to retry the tier, s to try saving again, Enter for the menu:"
        }
        QuizScreen::Results(_) => "r to retry the tier, Enter for the menu:",
        QuizScreen::TierSelect => "",
    }
}

/// Play `difficulty` until the learner leaves the results screen or quits.
///
/// # Errors
///
/// Returns an error if the tier cannot be started or stdin fails.
pub async fn play(
    terminal: &mut Terminal,
    vm: &mut QuizVm,
    difficulty: Difficulty,
) -> anyhow::Result<()> {
    let mut screen = vm
        .handle(QuizIntent::Start(difficulty))
        .await
        .map_err(|e| anyhow::anyhow!(e.message()))?;

    loop {
        match &screen {
            QuizScreen::TierSelect => return Ok(()),
            QuizScreen::Question(question) => print_question(question),
            QuizScreen::Results(results) => print_results(results),
        }

        let Some(input) = terminal.read(prompt_for(&screen)).await? else {
            vm.handle(QuizIntent::Quit).await.ok();
            return Ok(());
        };
        let Some(intent) = parse_intent(&screen, &input) else {
            println!("Not a valid choice.");
            continue;
        };
        match vm.handle(intent).await {
            Ok(next) => screen = next,
            Err(err) => println!("{}", err.message()),
        }
    }
}

/// Tier menu loop for the interactive mode.
///
/// # Errors
///
/// Returns an error if stdin fails or a quiz cannot be started.
pub async fn run_menu(services: &AppServices) -> anyhow::Result<()> {
    let mut terminal = Terminal::new();
    let mut vm = QuizVm::new(services.quiz_engine());

    loop {
        println!();
        println!("Choose a difficulty:");
        let cards = load_tier_cards(&services.bank(), &services.stats()).await;
        print_tiers(&cards);

        let Some(input) = terminal
            .read("Number to play, s for stats, q to quit:")
            .await?
        else {
            return Ok(());
        };
        match input.as_str() {
            "q" => return Ok(()),
            "s" => print_stats(&load_stats(&services.stats()).await),
            other => {
                let choice = other
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| cards.get(i));
                match choice {
                    Some(card) => play(&mut terminal, &mut vm, card.difficulty).await?,
                    None => println!("Not a valid choice."),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    async fn question_screen() -> QuizScreen {
        let services = AppServices::in_memory(fixed_clock()).unwrap();
        let mut vm = QuizVm::new(services.quiz_engine());
        vm.handle(QuizIntent::Start(Difficulty::Easy)).await.unwrap()
    }

    #[tokio::test]
    async fn numbers_map_to_zero_based_picks() {
        let screen = question_screen().await;
        assert_eq!(parse_intent(&screen, "1"), Some(QuizIntent::Pick(0)));
        assert_eq!(parse_intent(&screen, "4"), Some(QuizIntent::Pick(3)));
        assert_eq!(parse_intent(&screen, "5"), None);
        assert_eq!(parse_intent(&screen, "0"), None);
        assert_eq!(parse_intent(&screen, ""), None);
        assert_eq!(parse_intent(&screen, "q"), Some(QuizIntent::Quit));
    }
}
