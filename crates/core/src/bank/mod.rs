//! Static catalog of question sets, one per difficulty tier.

mod data;

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{Difficulty, Question, QuestionDraft, QuestionError, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("tier {0} has no questions")]
    EmptyTier(Difficulty),

    #[error("tier {difficulty} declares {expected} questions but has {actual}")]
    CountMismatch {
        difficulty: Difficulty,
        expected: usize,
        actual: usize,
    },

    #[error("question id {0} is used more than once")]
    DuplicateId(QuestionId),

    #[error("tier {0} is missing from the bank")]
    MissingTier(Difficulty),

    #[error("tier {0} is defined more than once")]
    DuplicateTier(Difficulty),
}

/// Display metadata for a tier. Not used by scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierInfo {
    pub difficulty: Difficulty,
    pub name: String,
    pub description: String,
    pub expected_count: usize,
}

/// One difficulty tier and its ordered questions.
#[derive(Debug, Clone)]
pub struct Tier {
    info: TierInfo,
    questions: Arc<[Question]>,
}

impl Tier {
    /// Validate the drafts and build a tier.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if any question is invalid, the tier is empty, or the
    /// declared count disagrees with the number of questions.
    pub fn new(info: TierInfo, drafts: Vec<QuestionDraft>) -> Result<Self, BankError> {
        if drafts.is_empty() {
            return Err(BankError::EmptyTier(info.difficulty));
        }
        if drafts.len() != info.expected_count {
            return Err(BankError::CountMismatch {
                difficulty: info.difficulty,
                expected: info.expected_count,
                actual: drafts.len(),
            });
        }
        let questions = drafts
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            info,
            questions: questions.into(),
        })
    }

    #[must_use]
    pub fn info(&self) -> &TierInfo {
        &self.info
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.info.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Shared handle to the question list, for sessions that outlive a borrow of the bank.
    #[must_use]
    pub fn shared_questions(&self) -> Arc<[Question]> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Read-only question catalog covering every `Difficulty`.
///
/// Because the tier set is closed and construction requires all of them,
/// lookups cannot fail.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    tiers: [Tier; 4],
}

impl QuestionBank {
    /// Build a bank from one tier per difficulty, in any order.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if a tier is missing or repeated, or if a question id
    /// appears in more than one place.
    pub fn from_tiers(mut tiers: Vec<Tier>) -> Result<Self, BankError> {
        tiers.sort_by_key(Tier::difficulty);

        for pair in tiers.windows(2) {
            if pair[0].difficulty() == pair[1].difficulty() {
                return Err(BankError::DuplicateTier(pair[0].difficulty()));
            }
        }
        for difficulty in Difficulty::ALL {
            if !tiers.iter().any(|t| t.difficulty() == difficulty) {
                return Err(BankError::MissingTier(difficulty));
            }
        }

        let mut seen = HashSet::new();
        for question in tiers.iter().flat_map(Tier::questions) {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id()));
            }
        }

        let tiers: [Tier; 4] = tiers
            .try_into()
            .map_err(|_| BankError::MissingTier(Difficulty::Expert))?;
        Ok(Self { tiers })
    }

    /// The catalog shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the built-in data breaks an invariant, which the
    /// crate's tests guard against.
    pub fn builtin() -> Result<Self, BankError> {
        let tiers = Difficulty::ALL
            .into_iter()
            .map(|difficulty| {
                let (name, description, raw) = match difficulty {
                    Difficulty::Easy => (
                        "Easy",
                        "Moving around and handling files.",
                        data::EASY,
                    ),
                    Difficulty::Medium => (
                        "Medium",
                        "Searching, viewing text and redirecting output.",
                        data::MEDIUM,
                    ),
                    Difficulty::Hard => (
                        "Hard",
                        "Permissions, processes and text processing.",
                        data::HARD,
                    ),
                    Difficulty::Expert => (
                        "Expert",
                        "Scripting, quoting and system internals.",
                        data::EXPERT,
                    ),
                };
                let drafts = raw
                    .iter()
                    .map(|r| QuestionDraft {
                        id: QuestionId::new(r.id),
                        prompt: r.prompt.to_owned(),
                        options: r.options.iter().map(|o| (*o).to_owned()).collect(),
                        correct_answer: r.correct,
                        explanation: r.explanation.to_owned(),
                        category: r.category.to_owned(),
                    })
                    .collect();
                let info = TierInfo {
                    difficulty,
                    name: name.to_owned(),
                    description: description.to_owned(),
                    expected_count: declared_count(difficulty),
                };
                Tier::new(info, drafts)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_tiers(tiers)
    }

    #[must_use]
    pub fn tier(&self, difficulty: Difficulty) -> &Tier {
        &self.tiers[difficulty.index()]
    }

    #[must_use]
    pub fn questions(&self, difficulty: Difficulty) -> &[Question] {
        self.tier(difficulty).questions()
    }

    /// Tier metadata in display order.
    pub fn catalog(&self) -> impl Iterator<Item = &TierInfo> {
        self.tiers.iter().map(Tier::info)
    }
}

fn declared_count(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 12,
        Difficulty::Hard => 15,
        Difficulty::Expert => 18,
    }
}
