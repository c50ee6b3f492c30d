use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use quiz_core::QuestionBank;
use quiz_core::model::Difficulty;
use quiz_core::time::{fixed_clock, fixed_now};
use services::{
    AdvanceOutcome, CompletionReport, QuizEngine, SavePolicy, SaveStatus, SessionError,
    StatsService,
};
use storage::repository::{InMemoryRepository, KeyValueRepository, StorageError};

/// Store that refuses writes while `offline` is set.
#[derive(Default)]
struct SwitchableStore {
    inner: InMemoryRepository,
    offline: AtomicBool,
}

#[async_trait]
impl KeyValueRepository for SwitchableStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("disk full".into()));
        }
        self.inner.put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

fn engine_with(stats: StatsService) -> QuizEngine {
    let bank = Arc::new(QuestionBank::builtin().expect("builtin bank"));
    QuizEngine::new(fixed_clock(), bank, Arc::new(stats))
}

/// Answer every question, picking the correct option for the first
/// `correct_count` questions and a wrong one for the rest.
async fn play(
    engine: &mut QuizEngine,
    difficulty: Difficulty,
    correct_count: usize,
) -> CompletionReport {
    engine.start_session(difficulty);
    let mut index = 0;
    loop {
        let question = engine.current_question().expect("question").clone();
        let pick = if index < correct_count {
            question.correct_answer()
        } else {
            (question.correct_answer() + 1) % question.option_count()
        };
        engine.submit_answer(pick).expect("submit");
        index += 1;

        match engine.advance().await.expect("advance") {
            AdvanceOutcome::Next(progress) => assert_eq!(progress.position, index + 1),
            AdvanceOutcome::Completed(report) => return report,
        }
    }
}

#[tokio::test]
async fn easy_all_correct_is_perfect() {
    let mut engine = engine_with(StatsService::in_memory(fixed_clock()));

    let report = play(&mut engine, Difficulty::Easy, 10).await;

    assert_eq!(report.result.score(), 10);
    assert_eq!(report.result.total_questions(), 10);
    assert_eq!(report.result.percentage(), 100);
    assert!(report.result.is_perfect());
    assert!(report.is_saved());

    let stored = engine.stats().get_result(Difficulty::Easy).await.unwrap();
    assert!(stored.is_perfect());
    assert_eq!(stored.completed_at(), fixed_now());
}

#[tokio::test]
async fn medium_half_correct_scores_fifty() {
    let mut engine = engine_with(StatsService::in_memory(fixed_clock()));

    let report = play(&mut engine, Difficulty::Medium, 6).await;

    assert_eq!(report.result.score(), 6);
    assert_eq!(report.result.total_questions(), 12);
    assert_eq!(report.result.percentage(), 50);
    assert!(!report.result.is_perfect());
    assert!(!engine.stats().is_perfect(Difficulty::Medium).await);
}

#[tokio::test]
async fn zero_correct_scores_zero() {
    let mut engine = engine_with(StatsService::in_memory(fixed_clock()));

    let report = play(&mut engine, Difficulty::Hard, 0).await;

    assert_eq!(report.result.score(), 0);
    assert_eq!(report.result.percentage(), 0);
    assert!(!report.result.is_perfect());
    assert_eq!(engine.stats().get_last_percentage(Difficulty::Hard).await, 0);
    assert!(engine.stats().is_completed(Difficulty::Hard).await);
}

#[tokio::test]
async fn completed_session_is_terminal_until_restart() {
    let mut engine = engine_with(StatsService::in_memory(fixed_clock()));
    play(&mut engine, Difficulty::Easy, 3).await;

    assert_eq!(engine.submit_answer(0), Err(SessionError::Completed));
    assert_eq!(engine.advance().await, Err(SessionError::Completed));
    assert!(engine.progress().unwrap().is_complete());
    assert_eq!(engine.last_completion().unwrap().result.score(), 3);

    let progress = engine.start_session(Difficulty::Easy);
    assert_eq!((progress.position, progress.total), (1, 10));
    assert!(engine.last_completion().is_none());
}

#[tokio::test]
async fn abandoned_attempt_is_not_saved() {
    let mut engine = engine_with(StatsService::in_memory(fixed_clock()));
    engine.start_session(Difficulty::Expert);
    for _ in 0..5 {
        engine.submit_answer(0).unwrap();
        engine.advance().await.unwrap();
    }

    engine.start_session(Difficulty::Easy);

    assert!(!engine.stats().is_completed(Difficulty::Expert).await);
    assert_eq!(engine.stats().get_aggregate().await.total_completed, 0);
}

#[tokio::test]
async fn replay_replaces_score_under_last_attempt_policy() {
    let mut engine = engine_with(StatsService::in_memory(fixed_clock()));

    play(&mut engine, Difficulty::Easy, 10).await;
    play(&mut engine, Difficulty::Easy, 2).await;

    let stored = engine.stats().get_result(Difficulty::Easy).await.unwrap();
    assert_eq!(stored.percentage(), 20);
    assert!(!stored.is_perfect());
}

#[tokio::test]
async fn replay_keeps_best_under_best_score_policy() {
    let stats = StatsService::in_memory(fixed_clock()).with_policy(SavePolicy::BestScore);
    let mut engine = engine_with(stats);

    play(&mut engine, Difficulty::Easy, 10).await;
    let report = play(&mut engine, Difficulty::Easy, 2).await;

    assert_eq!(report.result.percentage(), 20);
    match &report.save {
        SaveStatus::Saved(kept) => assert_eq!(kept.percentage(), 100),
        other => panic!("expected saved, got {other:?}"),
    }
    assert!(engine.stats().is_perfect(Difficulty::Easy).await);
}

#[tokio::test]
async fn failed_save_still_completes_and_can_be_retried() {
    let store = Arc::new(SwitchableStore::default());
    let stats = StatsService::new(fixed_clock(), store.clone());
    let mut engine = engine_with(stats);
    store.offline.store(true, Ordering::SeqCst);

    let report = play(&mut engine, Difficulty::Easy, 10).await;

    assert!(report.result.is_perfect());
    assert!(matches!(report.save, SaveStatus::Failed(_)));
    assert!(engine.session().unwrap().is_complete());
    assert!(engine.stats().get_all_results().await.is_empty());

    store.offline.store(false, Ordering::SeqCst);
    let retried = engine.retry_save().await.unwrap();

    assert!(retried.is_saved());
    assert!(engine.stats().is_perfect(Difficulty::Easy).await);
    assert_eq!(engine.retry_save().await.unwrap(), retried);
}

#[tokio::test]
async fn aggregate_after_several_tiers() {
    let mut engine = engine_with(StatsService::in_memory(fixed_clock()));

    play(&mut engine, Difficulty::Easy, 10).await;
    play(&mut engine, Difficulty::Medium, 6).await;
    play(&mut engine, Difficulty::Hard, 10).await;

    let aggregate = engine.stats().get_aggregate().await;
    assert_eq!(aggregate.total_completed, 3);
    assert_eq!(aggregate.total_perfect, 1);
    assert_eq!(aggregate.average_score, 72);
    assert_eq!(aggregate.last_completed, Some(fixed_now()));
}
