use std::sync::Arc;

use quiz_core::QuestionBank;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::sessions::QuizEngine;
use crate::stats_service::{SavePolicy, StatsService};

/// Assembles the question bank, the stats store and quiz engines.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    bank: Arc<QuestionBank>,
    stats: Arc<StatsService>,
}

impl AppServices {
    /// Build services over an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the built-in question data is invalid.
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        policy: SavePolicy,
    ) -> Result<Self, AppServicesError> {
        let bank = Arc::new(QuestionBank::builtin()?);
        let stats =
            Arc::new(StatsService::new(clock, Arc::clone(&storage.kv)).with_policy(policy));
        Ok(Self { clock, bank, stats })
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or bank loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        policy: SavePolicy,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock, policy)
    }

    /// Build services over a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the built-in question data is invalid.
    pub fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), clock, SavePolicy::default())
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    /// A new engine with no active session, sharing this bank and store.
    #[must_use]
    pub fn quiz_engine(&self) -> QuizEngine {
        QuizEngine::new(self.clock, self.bank(), self.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn engines_share_one_store() {
        let services = AppServices::in_memory(fixed_clock()).unwrap();
        let mut engine = services.quiz_engine();
        engine.start_session(quiz_core::model::Difficulty::Easy);
        while engine.session().is_some_and(|s| !s.is_complete()) {
            engine.submit_answer(0).unwrap();
            engine.advance().await.unwrap();
        }

        let other = services.quiz_engine();
        assert!(other.session().is_none());
        assert!(
            other
                .stats()
                .is_completed(quiz_core::model::Difficulty::Easy)
                .await
        );
    }
}
