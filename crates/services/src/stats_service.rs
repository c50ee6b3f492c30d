use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use quiz_core::model::{Difficulty, QuizResult, ResultsByDifficulty, StatsAggregate};
use storage::repository::{InMemoryRepository, KeyValueRepository, StorageError};
use storage::results::{STATS_STORAGE_KEY, decode_results, encode_results};

use crate::Clock;
use crate::error::StatsError;

/// Which result to keep when a tier already has one saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SavePolicy {
    /// The newest attempt always replaces the stored one.
    #[default]
    LastAttempt,
    /// Keep whichever attempt has the higher percentage; ties go to the newer one.
    BestScore,
}

impl SavePolicy {
    fn keep_existing(self, existing: &QuizResult, incoming: &QuizResult) -> bool {
        match self {
            SavePolicy::LastAttempt => false,
            SavePolicy::BestScore => existing.percentage() > incoming.percentage(),
        }
    }
}

impl fmt::Display for SavePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavePolicy::LastAttempt => f.write_str("last"),
            SavePolicy::BestScore => f.write_str("best"),
        }
    }
}

impl FromStr for SavePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" | "last-attempt" => Ok(SavePolicy::LastAttempt),
            "best" | "best-score" => Ok(SavePolicy::BestScore),
            other => Err(format!("unknown save policy: {other}")),
        }
    }
}

/// Durable per-tier result store with derived statistics.
///
/// The whole mapping is kept under one key. Writes are read-modify-write
/// cycles serialized through an async lock; reads never fail and treat an
/// unreadable or corrupt store as empty.
#[derive(Clone)]
pub struct StatsService {
    clock: Clock,
    store: Arc<dyn KeyValueRepository>,
    policy: SavePolicy,
    write_lock: Arc<Mutex<()>>,
}

impl StatsService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueRepository>) -> Self {
        Self {
            clock,
            store,
            policy: SavePolicy::default(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Arc::new(InMemoryRepository::new()))
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SavePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> SavePolicy {
        self.policy
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Record a finished attempt for `difficulty`, stamped with the current time.
    ///
    /// Returns the result that is stored for the tier afterwards, which under
    /// `SavePolicy::BestScore` may be the earlier attempt.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Result` for an impossible score, or
    /// `StatsError::Storage`/`StatsError::Codec` if the mapping cannot be
    /// read or written. Entries for other tiers are left untouched on failure.
    pub async fn save_result(
        &self,
        difficulty: Difficulty,
        score: u32,
        total_questions: u32,
    ) -> Result<QuizResult, StatsError> {
        let incoming = QuizResult::from_score(difficulty, score, total_questions, self.now())?;
        self.record(incoming).await
    }

    /// Store an already scored attempt, keeping its own timestamp.
    ///
    /// Returns the result that is stored for the tier afterwards. When the
    /// policy keeps `incoming`, the returned value equals it.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage`/`StatsError::Codec` if the mapping cannot
    /// be read or written. Entries for other tiers are left untouched on failure.
    pub async fn record(&self, incoming: QuizResult) -> Result<QuizResult, StatsError> {
        let difficulty = incoming.difficulty();
        let _guard = self.write_lock.lock().await;
        let mut results = self.load().await?;

        let retained = match results.get(&difficulty) {
            Some(existing) if self.policy.keep_existing(existing, &incoming) => existing.clone(),
            _ => incoming,
        };
        results.insert(difficulty, retained.clone());

        let raw = encode_results(&results)?;
        self.store.put(STATS_STORAGE_KEY, &raw).await?;

        tracing::info!(
            difficulty = %difficulty,
            score = retained.score(),
            total_questions = retained.total_questions(),
            percentage = retained.percentage(),
            policy = %self.policy,
            "saved quiz result"
        );
        Ok(retained)
    }

    /// Every saved result, keyed by tier. Empty when nothing is saved or the
    /// store cannot be read.
    pub async fn get_all_results(&self) -> ResultsByDifficulty {
        match self.load().await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(error = %err, "results store unavailable, treating as empty");
                ResultsByDifficulty::new()
            }
        }
    }

    pub async fn get_result(&self, difficulty: Difficulty) -> Option<QuizResult> {
        self.get_all_results().await.remove(&difficulty)
    }

    pub async fn is_completed(&self, difficulty: Difficulty) -> bool {
        self.get_result(difficulty).await.is_some()
    }

    pub async fn is_perfect(&self, difficulty: Difficulty) -> bool {
        self.get_result(difficulty)
            .await
            .is_some_and(|r| r.is_perfect())
    }

    /// Percentage of the stored attempt, 0 when there is none.
    pub async fn get_last_percentage(&self, difficulty: Difficulty) -> u8 {
        self.get_result(difficulty)
            .await
            .map_or(0, |r| r.percentage())
    }

    pub async fn get_aggregate(&self) -> StatsAggregate {
        let results = self.get_all_results().await;
        StatsAggregate::from_results(results.values())
    }

    /// Erase every saved result.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the store cannot be written.
    pub async fn clear_all(&self) -> Result<(), StatsError> {
        let _guard = self.write_lock.lock().await;
        self.store.remove(STATS_STORAGE_KEY).await?;
        tracing::info!("cleared all quiz results");
        Ok(())
    }

    async fn load(&self) -> Result<ResultsByDifficulty, StorageError> {
        let Some(raw) = self.store.get(STATS_STORAGE_KEY).await? else {
            return Ok(ResultsByDifficulty::new());
        };
        match decode_results(&raw) {
            Ok(results) => Ok(results),
            Err(err) => {
                tracing::warn!(error = %err, "stored results are corrupt, treating as empty");
                Ok(ResultsByDifficulty::new())
            }
        }
    }
}

impl fmt::Debug for StatsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsService")
            .field("clock", &self.clock)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::Duration;
    use quiz_core::time::{fixed_clock, fixed_now};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store whose reads and writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryRepository,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl KeyValueRepository for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StorageError::Connection("read refused".into()));
            }
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Connection("write refused".into()));
            }
            self.inner.put(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Connection("write refused".into()));
            }
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn empty_store_has_neutral_defaults() {
        let stats = StatsService::in_memory(fixed_clock());

        assert!(stats.get_all_results().await.is_empty());
        assert_eq!(stats.get_result(Difficulty::Easy).await, None);
        assert!(!stats.is_completed(Difficulty::Easy).await);
        assert!(!stats.is_perfect(Difficulty::Easy).await);
        assert_eq!(stats.get_last_percentage(Difficulty::Easy).await, 0);
        assert_eq!(
            stats.get_aggregate().await,
            StatsAggregate {
                total_completed: 0,
                total_perfect: 0,
                average_score: 0,
                last_completed: None,
            }
        );
    }

    #[tokio::test]
    async fn save_result_stamps_and_rounds() {
        let stats = StatsService::in_memory(fixed_clock());

        let saved = stats.save_result(Difficulty::Hard, 10, 15).await.unwrap();

        assert_eq!(saved.percentage(), 67);
        assert!(!saved.is_perfect());
        assert_eq!(saved.completed_at(), fixed_now());
        let all = stats.get_all_results().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[&Difficulty::Hard].percentage(), 67);
        assert!(stats.is_completed(Difficulty::Hard).await);
    }

    #[tokio::test]
    async fn second_save_replaces_first() {
        let stats = StatsService::in_memory(fixed_clock());

        stats.save_result(Difficulty::Easy, 10, 10).await.unwrap();
        stats.save_result(Difficulty::Easy, 3, 10).await.unwrap();

        let result = stats.get_result(Difficulty::Easy).await.unwrap();
        assert_eq!(result.score(), 3);
        assert_eq!(result.percentage(), 30);
        assert!(!stats.is_perfect(Difficulty::Easy).await);
        assert_eq!(stats.get_all_results().await.len(), 1);
    }

    #[tokio::test]
    async fn record_keeps_the_attempt_timestamp() {
        let stats = StatsService::in_memory(Clock::default_clock());
        let attempted_at = fixed_now() + Duration::nanoseconds(435_325_738);
        let attempt = QuizResult::from_score(Difficulty::Easy, 10, 10, attempted_at).unwrap();

        let retained = stats.record(attempt.clone()).await.unwrap();

        assert_eq!(retained, attempt);
        assert_eq!(stats.get_result(Difficulty::Easy).await, Some(attempt));
    }

    #[tokio::test]
    async fn best_score_policy_keeps_higher_attempt() {
        let stats = StatsService::in_memory(fixed_clock()).with_policy(SavePolicy::BestScore);

        stats.save_result(Difficulty::Medium, 12, 12).await.unwrap();
        let retained = stats.save_result(Difficulty::Medium, 6, 12).await.unwrap();

        assert_eq!(retained.score(), 12);
        assert!(stats.is_perfect(Difficulty::Medium).await);

        let improved = stats.save_result(Difficulty::Expert, 9, 18).await.unwrap();
        assert_eq!(improved.percentage(), 50);
        let improved = stats.save_result(Difficulty::Expert, 12, 18).await.unwrap();
        assert_eq!(improved.percentage(), 67);
    }

    #[tokio::test]
    async fn saving_one_tier_keeps_others() {
        let stats = StatsService::in_memory(fixed_clock());

        stats.save_result(Difficulty::Easy, 10, 10).await.unwrap();
        stats.save_result(Difficulty::Medium, 6, 12).await.unwrap();
        stats.save_result(Difficulty::Easy, 5, 10).await.unwrap();

        let all = stats.get_all_results().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[&Difficulty::Medium].percentage(), 50);
    }

    #[tokio::test]
    async fn aggregate_reports_counts_mean_and_latest() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut clock = fixed_clock();
        StatsService::new(clock, repo.clone())
            .save_result(Difficulty::Easy, 10, 10)
            .await
            .unwrap();
        clock.advance(Duration::hours(1));
        let stats = StatsService::new(clock, repo);
        stats.save_result(Difficulty::Medium, 6, 12).await.unwrap();

        let aggregate = stats.get_aggregate().await;

        assert_eq!(aggregate.total_completed, 2);
        assert_eq!(aggregate.total_perfect, 1);
        assert_eq!(aggregate.average_score, 75);
        assert_eq!(aggregate.last_completed, Some(fixed_now() + Duration::hours(1)));
    }

    #[tokio::test]
    async fn clear_all_erases_mapping() {
        let stats = StatsService::in_memory(fixed_clock());
        stats.save_result(Difficulty::Easy, 10, 10).await.unwrap();

        stats.clear_all().await.unwrap();

        assert!(stats.get_all_results().await.is_empty());
        assert_eq!(stats.get_aggregate().await.total_completed, 0);
    }

    #[tokio::test]
    async fn corrupt_store_reads_as_empty_and_is_overwritten() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.put(STATS_STORAGE_KEY, "{not json").await.unwrap();
        let stats = StatsService::new(fixed_clock(), repo.clone());

        assert!(stats.get_all_results().await.is_empty());
        assert_eq!(stats.get_aggregate().await.total_completed, 0);

        stats.save_result(Difficulty::Easy, 4, 10).await.unwrap();
        assert_eq!(stats.get_last_percentage(Difficulty::Easy).await, 40);
    }

    #[tokio::test]
    async fn unreadable_store_reads_as_empty() {
        let store = Arc::new(FlakyStore::default());
        let stats = StatsService::new(fixed_clock(), store.clone());
        stats.save_result(Difficulty::Easy, 10, 10).await.unwrap();

        store.fail_reads.store(true, Ordering::SeqCst);

        assert!(stats.get_all_results().await.is_empty());
        assert!(!stats.is_completed(Difficulty::Easy).await);
        // A failed read must not be mistaken for an empty mapping when writing.
        let err = stats.save_result(Difficulty::Hard, 1, 15).await.unwrap_err();
        assert!(matches!(err, StatsError::Storage(_)));

        store.fail_reads.store(false, Ordering::SeqCst);
        assert!(stats.is_perfect(Difficulty::Easy).await);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_mapping() {
        let store = Arc::new(FlakyStore::default());
        let stats = StatsService::new(fixed_clock(), store.clone());
        stats.save_result(Difficulty::Easy, 10, 10).await.unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        let err = stats.save_result(Difficulty::Easy, 0, 10).await.unwrap_err();
        assert!(matches!(err, StatsError::Storage(_)));

        store.fail_writes.store(false, Ordering::SeqCst);
        assert_eq!(stats.get_last_percentage(Difficulty::Easy).await, 100);
    }

    #[tokio::test]
    async fn rejects_impossible_scores() {
        let stats = StatsService::in_memory(fixed_clock());
        let err = stats.save_result(Difficulty::Easy, 11, 10).await.unwrap_err();
        assert!(matches!(err, StatsError::Result(_)));
        assert!(stats.get_all_results().await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_saves_do_not_lose_tiers() {
        let stats = StatsService::in_memory(fixed_clock());
        let handles: Vec<_> = Difficulty::ALL
            .into_iter()
            .map(|difficulty| {
                let stats = stats.clone();
                tokio::spawn(async move { stats.save_result(difficulty, 1, 2).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(stats.get_all_results().await.len(), 4);
    }

    #[test]
    fn policy_parses_short_and_long_names() {
        assert_eq!("best".parse::<SavePolicy>().unwrap(), SavePolicy::BestScore);
        assert_eq!("Last-Attempt".parse::<SavePolicy>().unwrap(), SavePolicy::LastAttempt);
        assert!("sometimes".parse::<SavePolicy>().is_err());
    }
}
