use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} needs at least two options, got {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id} marks option {index} correct but only has {len}")]
    AnswerOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
}

/// Unvalidated question data, as written in the bank source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub category: String,
}

impl QuestionDraft {
    /// Check the draft and turn it into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, fewer than two options
    /// are given, or `correct_answer` does not index into `options`.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = self.id;
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: self.options.len(),
            });
        }
        if self.correct_answer >= self.options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                id,
                index: self.correct_answer,
                len: self.options.len(),
            });
        }

        Ok(Question {
            id,
            prompt: self.prompt,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            category: self.category,
        })
    }
}

/// A multiple-choice question from the static bank.
///
/// `correct_answer` is always a valid index into `options`; the only way to
/// build one is through `QuestionDraft::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_answer: usize,
    explanation: String,
    category: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Display-only grouping label.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(options: &[&str], correct_answer: usize) -> QuestionDraft {
        QuestionDraft {
            id: QuestionId::new(7),
            prompt: "Which command lists files?".into(),
            options: options.iter().map(|s| (*s).to_owned()).collect(),
            correct_answer,
            explanation: "ls lists directory contents.".into(),
            category: "Navigation".into(),
        }
    }

    #[test]
    fn validates_well_formed_question() {
        let question = draft(&["ls", "cd", "pwd"], 0).validate().unwrap();
        assert_eq!(question.option_count(), 3);
        assert!(question.is_correct(0));
        assert!(!question.is_correct(2));
        assert_eq!(question.category(), "Navigation");
    }

    #[test]
    fn rejects_single_option() {
        let err = draft(&["ls"], 0).validate().unwrap_err();
        assert_eq!(
            err,
            QuestionError::TooFewOptions {
                id: QuestionId::new(7),
                len: 1
            }
        );
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let err = draft(&["ls", "cd"], 2).validate().unwrap_err();
        assert!(matches!(err, QuestionError::AnswerOutOfRange { index: 2, len: 2, .. }));
    }

    #[test]
    fn rejects_blank_prompt() {
        let mut d = draft(&["ls", "cd"], 0);
        d.prompt = "   ".into();
        assert!(matches!(d.validate(), Err(QuestionError::EmptyPrompt { .. })));
    }
}
