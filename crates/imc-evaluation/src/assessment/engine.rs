use std::collections::BTreeMap;

use super::domain::{FlattenedQuestion, QuestionId, Theme, ThemeId, ANSWER_MAX, ANSWER_MIN};

/// Drives one ordered pass over a theme's flattened question list,
/// collecting one answer per question and producing the total score once
/// the respondent explicitly finalizes.
///
/// Navigation saturates at both ends and never completes implicitly;
/// completion is a separate, user-triggered transition so earlier answers
/// can still be revisited from the last question.
#[derive(Debug, Clone)]
pub struct QuestionnaireEngine {
    theme_id: ThemeId,
    questions: Vec<FlattenedQuestion>,
    cursor: usize,
    answers: BTreeMap<QuestionId, u8>,
    completed: bool,
}

/// Final tally handed to the flow once the questionnaire is finalized.
#[derive(Debug, Clone)]
pub struct QuestionnaireOutcome {
    pub theme_id: ThemeId,
    pub total_score: u16,
    pub answers: BTreeMap<QuestionId, u8>,
}

impl QuestionnaireEngine {
    pub fn new(theme: &Theme) -> Result<Self, EngineError> {
        let questions = theme.flattened_questions();
        if questions.is_empty() {
            return Err(EngineError::EmptyTheme { theme: theme.id });
        }

        Ok(Self {
            theme_id: theme.id,
            questions,
            cursor: 0,
            answers: BTreeMap::new(),
            completed: false,
        })
    }

    pub fn theme_id(&self) -> ThemeId {
        self.theme_id
    }

    pub fn questions(&self) -> &[FlattenedQuestion] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_question(&self) -> &FlattenedQuestion {
        &self.questions[self.cursor]
    }

    pub fn is_at_last_question(&self) -> bool {
        self.cursor == self.questions.len() - 1
    }

    /// True only after the respondent explicitly finalized via [`complete`].
    ///
    /// [`complete`]: Self::complete
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Display fraction `(cursor + 1) / N`, as a percentage.
    pub fn progress_percent(&self) -> f64 {
        (self.cursor as f64 + 1.0) / self.questions.len() as f64 * 100.0
    }

    /// Records `value` for the current question, overwriting any prior
    /// answer so the respondent can revisit and change their mind.
    pub fn answer(&mut self, value: u8) -> Result<(), EngineError> {
        if !(ANSWER_MIN..=ANSWER_MAX).contains(&value) {
            return Err(EngineError::InvalidAnswerValue { value });
        }
        let id = self.current_question().id.clone();
        self.answers.insert(id, value);
        Ok(())
    }

    pub fn answer_for(&self, id: &QuestionId) -> Option<u8> {
        self.answers.get(id).copied()
    }

    pub fn current_answer(&self) -> Option<u8> {
        self.answers.get(&self.current_question().id).copied()
    }

    pub fn answered_ids(&self) -> Vec<QuestionId> {
        self.answers.keys().cloned().collect()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Moves the cursor forward one question, saturating at the last index.
    /// Advancing from the last question is a no-op, never an implicit
    /// completion.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor back one question, saturating at index 0.
    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Sets the cursor directly, supporting the quick-navigation affordance.
    pub fn jump_to(&mut self, index: usize) -> Result<(), EngineError> {
        if index >= self.questions.len() {
            return Err(EngineError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    /// Finalizes the questionnaire and sums the recorded answers.
    ///
    /// Only valid from the last question. Full answer coverage is not
    /// required here; the presentation layer enforces answer-before-advance,
    /// and an under-answered total simply reflects the answers present.
    pub fn complete(&mut self) -> Result<QuestionnaireOutcome, EngineError> {
        if !self.is_at_last_question() {
            return Err(EngineError::NotAtFinalQuestion {
                cursor: self.cursor,
                len: self.questions.len(),
            });
        }

        self.completed = true;
        let total_score = self.answers.values().map(|&value| value as u16).sum();

        Ok(QuestionnaireOutcome {
            theme_id: self.theme_id,
            total_score,
            answers: self.answers.clone(),
        })
    }
}

/// Caller contract violations and the empty-theme configuration guard.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("theme '{theme}' has no questions to present")]
    EmptyTheme { theme: ThemeId },
    #[error("answer value {value} is outside the {ANSWER_MIN}-{ANSWER_MAX} scale")]
    InvalidAnswerValue { value: u8 },
    #[error("question index {index} out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot complete from question {cursor} of {len}; completion requires the last question")]
    NotAtFinalQuestion { cursor: usize, len: usize },
}
