//! Practice session: the single long-lived engine state owned by the
//! presentation layer.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::answer::{is_correct, parse_answer};
use crate::config::GameConfig;
use crate::constants::{LOG_TARGET_SESSION, LOG_TARGET_STORE};
use crate::difficulty::DifficultyCategory;
use crate::emoji::pick_emoji_pair;
use crate::error::AnswerError;
use crate::operation::Operation;
use crate::progression::{Position, position};
use crate::question::Question;
use crate::storage::{ProgressStore, SavedProgress};

/// Result of checking one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub category: DifficultyCategory,
    /// Zero for wrong answers.
    pub points_awarded: u32,
    /// A correct answer moved the player into a new stage.
    pub stage_changed: bool,
    pub position: Position,
}

impl AnswerOutcome {
    /// Feedback line shown under the question.
    #[must_use]
    pub fn message(&self) -> String {
        if self.correct {
            format!("Correct! That was {}.", self.category)
        } else {
            String::from("Oops! Try again.")
        }
    }
}

/// Per-run counters; not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
}

/// Operands plus the emoji used to draw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllustratedQuestion {
    pub question: Question,
    pub first_emoji: &'static str,
    pub second_emoji: &'static str,
}

/// One player's practice run: current score, operation and question, backed
/// by a [`ProgressStore`].
pub struct PracticeSession<S, R = ChaCha20Rng>
where
    S: ProgressStore,
    R: Rng,
{
    config: GameConfig,
    store: S,
    rng: R,
    score: u64,
    operation: Operation,
    question: Question,
    stats: SessionStats,
}

impl<S> PracticeSession<S, ChaCha20Rng>
where
    S: ProgressStore,
{
    /// Session whose questions replay exactly for the same `seed`.
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Self {
        Self::new(config, store, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<S, R> PracticeSession<S, R>
where
    S: ProgressStore,
    R: Rng,
{
    /// Start a session, restoring whatever the store holds. A failing or
    /// empty store starts from score 0 with addition.
    pub fn new(config: GameConfig, store: S, mut rng: R) -> Self {
        let saved = match store.load() {
            Ok(saved) => saved.unwrap_or_default(),
            Err(err) => {
                log::warn!(target: LOG_TARGET_STORE, "ignoring unreadable progress: {err}");
                SavedProgress::default()
            }
        };
        let question = Question::generate(saved.operation, &mut rng);
        log::debug!(
            target: LOG_TARGET_SESSION,
            "session start score={} operation={}",
            saved.score,
            saved.operation.as_str()
        );
        Self {
            config,
            store,
            rng,
            score: saved.score,
            operation: saved.operation,
            question,
            stats: SessionStats::default(),
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub const fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn category(&self) -> DifficultyCategory {
        self.question.category()
    }

    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn snapshot(&self) -> SavedProgress {
        SavedProgress::new(self.score, self.operation)
    }

    #[must_use]
    pub fn position(&self) -> Position {
        position(self.score)
    }

    /// Whether the presentation layer should offer a skip for this question.
    #[must_use]
    pub fn can_skip(&self) -> bool {
        self.config.can_skip(self.category())
    }

    /// Switch operation, persist the choice and draw a fresh question.
    pub fn select_operation(&mut self, operation: Operation) -> &Question {
        self.operation = operation;
        self.persist();
        self.generate_question()
    }

    /// Replace the current question with a new one for the current operation.
    pub fn generate_question(&mut self) -> &Question {
        self.question = Question::generate(self.operation, &mut self.rng);
        log::debug!(
            target: LOG_TARGET_SESSION,
            "question {} ({})",
            self.question,
            self.question.category()
        );
        &self.question
    }

    /// Like [`Self::generate_question`] but also picks two distinct emoji.
    pub fn generate_illustrated(&mut self) -> IllustratedQuestion {
        let question = *self.generate_question();
        let (first_emoji, second_emoji) = pick_emoji_pair(&mut self.rng);
        IllustratedQuestion {
            question,
            first_emoji,
            second_emoji,
        }
    }

    /// Drop the current question without scoring.
    pub fn skip(&mut self) -> &Question {
        self.stats.skipped = self.stats.skipped.saturating_add(1);
        self.generate_question()
    }

    /// Check raw input from the answer field.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerError`] for input that is not a number; the session is
    /// left untouched.
    pub fn submit_answer(&mut self, input: &str) -> Result<AnswerOutcome, AnswerError> {
        let value = parse_answer(input)?;
        self.submit_value(value)
    }

    /// Check an already-parsed answer. Correct answers score, persist and
    /// advance; wrong answers keep the question.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerError::NotANumber`] for NaN or infinite values; the
    /// session is left untouched.
    pub fn submit_value(&mut self, value: f64) -> Result<AnswerOutcome, AnswerError> {
        if !value.is_finite() {
            return Err(AnswerError::NotANumber(value.to_string()));
        }
        let category = self.category();
        if !is_correct(value, self.question.answer(), self.config.answer_tolerance) {
            self.stats.wrong = self.stats.wrong.saturating_add(1);
            return Ok(AnswerOutcome {
                correct: false,
                category,
                points_awarded: 0,
                stage_changed: false,
                position: self.position(),
            });
        }

        let before = self.position();
        let points = self.config.scoring.points_for(category);
        self.score = self.score.saturating_add(u64::from(points));
        self.stats.correct = self.stats.correct.saturating_add(1);
        self.persist();
        let after = self.position();
        let stage_changed = after.stage_index != before.stage_index;
        if stage_changed {
            log::debug!(
                target: LOG_TARGET_SESSION,
                "stage up: {}",
                after.stage_label()
            );
        }
        self.generate_question();
        Ok(AnswerOutcome {
            correct: true,
            category,
            points_awarded: points,
            stage_changed,
            position: after,
        })
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.snapshot()) {
            log::warn!(target: LOG_TARGET_STORE, "failed to save progress: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringTable;
    use crate::storage::{MemoryStore, NullStore};
    use std::cell::Cell;
    use std::io;

    #[derive(Default)]
    struct BrokenStore {
        save_attempts: Cell<usize>,
    }

    impl ProgressStore for BrokenStore {
        type Error = io::Error;

        fn load(&self) -> Result<Option<SavedProgress>, Self::Error> {
            Err(io::Error::other("storage disabled"))
        }

        fn save(&self, _progress: &SavedProgress) -> Result<(), Self::Error> {
            self.save_attempts.set(self.save_attempts.get() + 1);
            Err(io::Error::other("quota exceeded"))
        }
    }

    fn answer_text(session: &PracticeSession<impl ProgressStore>) -> String {
        session.question().answer().to_string()
    }

    #[test]
    fn fresh_session_defaults_to_addition() {
        let session = PracticeSession::with_seed(GameConfig::default(), NullStore, 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.operation(), Operation::Addition);
        assert_eq!(session.question().operation, Operation::Addition);
        assert_eq!(session.position(), position(0));
    }

    #[test]
    fn restores_stored_progress() {
        let store = MemoryStore::with_progress(SavedProgress::new(120, Operation::Division));
        let session = PracticeSession::with_seed(GameConfig::default(), store, 2);
        assert_eq!(session.score(), 120);
        assert_eq!(session.operation(), Operation::Division);
        assert_eq!(session.question().operation, Operation::Division);
    }

    #[test]
    fn correct_answer_scores_saves_and_advances() {
        let store = MemoryStore::default();
        let mut session = PracticeSession::with_seed(GameConfig::default(), store.clone(), 3);
        let asked = *session.question();
        let expected_points = ScoringTable::tiered().points_for(asked.category());

        let outcome = session.submit_answer(&answer_text(&session)).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points_awarded, expected_points);
        assert_eq!(session.score(), u64::from(expected_points));
        assert_eq!(store.snapshot().map(|p| p.score), Some(session.score()));
        assert_eq!(outcome.message(), format!("Correct! That was {}.", asked.category()));
        assert_eq!(session.stats().correct, 1);
    }

    #[test]
    fn wrong_answer_keeps_question_and_score() {
        let store = MemoryStore::default();
        let mut session = PracticeSession::with_seed(GameConfig::default(), store.clone(), 4);
        let asked = *session.question();
        let wrong = asked.answer() + 1.0;

        let outcome = session.submit_value(wrong).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(outcome.message(), "Oops! Try again.");
        assert_eq!(*session.question(), asked);
        assert_eq!(session.score(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn non_numeric_answer_is_ignored() {
        let store = MemoryStore::default();
        let mut session = PracticeSession::with_seed(GameConfig::default(), store.clone(), 5);
        let asked = *session.question();
        assert!(session.submit_answer("banana").is_err());
        assert!(session.submit_answer("").is_err());
        assert_eq!(*session.question(), asked);
        assert_eq!(session.stats(), SessionStats::default());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn skip_regenerates_without_scoring() {
        let mut session = PracticeSession::with_seed(GameConfig::default(), NullStore, 6);
        session.skip();
        session.skip();
        assert_eq!(session.score(), 0);
        assert_eq!(session.stats().skipped, 2);
    }

    #[test]
    fn can_skip_follows_config() {
        let mut session = PracticeSession::with_seed(GameConfig::default(), NullStore, 7);
        session.select_operation(Operation::Division);
        for _ in 0..200 {
            let expected = session.category() >= DifficultyCategory::ExtraHard;
            assert_eq!(session.can_skip(), expected);
            session.skip();
        }
    }

    #[test]
    fn select_operation_persists_choice() {
        let store = MemoryStore::default();
        let mut session = PracticeSession::with_seed(GameConfig::default(), store.clone(), 8);
        let question = *session.select_operation(Operation::Multiplication);
        assert_eq!(question.operation, Operation::Multiplication);
        assert_eq!(
            store.snapshot(),
            Some(SavedProgress::new(0, Operation::Multiplication))
        );
    }

    #[test]
    fn broken_store_never_blocks_progress() {
        let mut session = PracticeSession::with_seed(GameConfig::default(), BrokenStore::default(), 9);
        assert_eq!(session.score(), 0);
        for _ in 0..5 {
            let text = answer_text(&session);
            assert!(session.submit_answer(&text).unwrap().correct);
        }
        assert!(session.score() >= 5);
        assert_eq!(session.store().save_attempts.get(), 5);
    }

    #[test]
    fn flat_scoring_awards_one_point_each() {
        let config = GameConfig::default().with_scoring(ScoringTable::flat());
        let mut session = PracticeSession::with_seed(config, NullStore, 10);
        for _ in 0..25 {
            let text = answer_text(&session);
            session.submit_answer(&text).unwrap();
        }
        assert_eq!(session.score(), 25);
        assert_eq!(session.position().rank, 2);
    }

    #[test]
    fn stage_change_is_reported() {
        let store = MemoryStore::with_progress(SavedProgress::new(29, Operation::Addition));
        let config = GameConfig::default().with_scoring(ScoringTable::flat());
        let mut session = PracticeSession::with_seed(config, store, 11);
        let text = answer_text(&session);
        let outcome = session.submit_answer(&text).unwrap();
        assert!(outcome.stage_changed);
        assert_eq!(outcome.position.stage_index, 1);
    }

    #[test]
    fn illustrated_question_uses_distinct_emoji() {
        let mut session = PracticeSession::with_seed(GameConfig::default(), NullStore, 12);
        let shown = session.generate_illustrated();
        assert_ne!(shown.first_emoji, shown.second_emoji);
        assert_eq!(shown.question, *session.question());
    }

    #[test]
    fn same_seed_replays_same_session() {
        let mut first = PracticeSession::with_seed(GameConfig::default(), NullStore, 77);
        let mut second = PracticeSession::with_seed(GameConfig::default(), NullStore, 77);
        for _ in 0..20 {
            assert_eq!(first.question(), second.question());
            first.skip();
            second.skip();
        }
    }

    #[test]
    fn division_answers_accept_tolerance() {
        let mut session = PracticeSession::with_seed(GameConfig::default(), NullStore, 13);
        session.select_operation(Operation::Division);
        let exact = session.question().answer();
        assert!(session.submit_value(exact + 0.000_05).unwrap().correct);
    }

    #[test]
    fn non_finite_value_is_rejected_untouched() {
        let store = MemoryStore::default();
        let mut session = PracticeSession::with_seed(GameConfig::default(), store.clone(), 14);
        let asked = *session.question();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                session.submit_value(value),
                Err(AnswerError::NotANumber(_))
            ));
        }
        assert_eq!(*session.question(), asked);
        assert_eq!(session.stats(), SessionStats::default());
        assert_eq!(session.score(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn stats_saturate_instead_of_overflowing() {
        let mut session = PracticeSession::with_seed(GameConfig::default(), NullStore, 15);
        session.stats = SessionStats {
            correct: u32::MAX,
            wrong: u32::MAX,
            skipped: u32::MAX,
        };
        session.skip();
        let wrong = session.question().answer() + 1.0;
        session.submit_value(wrong).unwrap();
        let right = session.question().answer();
        assert!(session.submit_value(right).unwrap().correct);
        assert_eq!(
            session.stats(),
            SessionStats {
                correct: u32::MAX,
                wrong: u32::MAX,
                skipped: u32::MAX,
            }
        );
    }
}
