use std::sync::Arc;

use anyhow::Result;
use critter_math_game::{
    DifficultyCategory, GameConfig, Operation, Position, PracticeSession, ProgressStore, Question,
};
use serde::{Deserialize, Serialize};

use crate::logic::policy::{PlayerAction, PlayerProfile};

/// What to simulate for one seed.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub profile: PlayerProfile,
    /// Operations cycled through, switching every `rotate_every` turns.
    pub operations: Vec<Operation>,
    pub rotate_every: usize,
    pub turns: usize,
    /// Score already stored before the session starts.
    pub starting_score: u64,
    pub expectations: Vec<SimulationExpectation>,
}

impl SimulationPlan {
    #[must_use]
    pub fn new(profile: PlayerProfile, turns: usize) -> Self {
        Self {
            profile,
            operations: vec![Operation::Addition],
            rotate_every: turns.max(1),
            turns,
            starting_score: 0,
            expectations: Vec::new(),
        }
    }

    /// Keep whatever operation the store holds instead of selecting one.
    #[must_use]
    pub fn resuming(mut self) -> Self {
        self.operations.clear();
        self
    }

    #[must_use]
    pub const fn with_starting_score(mut self, score: u64) -> Self {
        self.starting_score = score;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: impl Into<SimulationExpectation>) -> Self {
        self.expectations.push(expectation.into());
        self
    }

    /// First operation played, used when seeding a store.
    #[must_use]
    pub fn first_operation(&self) -> Operation {
        self.operations.first().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn rotating(mut self, operations: &[Operation], rotate_every: usize) -> Self {
        self.operations = operations.to_vec();
        self.rotate_every = rotate_every.max(1);
        self
    }

    fn operation_for_turn(&self, turn: usize) -> Option<Operation> {
        if self.operations.is_empty() || turn % self.rotate_every != 0 {
            return None;
        }
        let slot = (turn / self.rotate_every) % self.operations.len();
        self.operations.get(slot).copied()
    }
}

/// Assertion hook run after a simulation completes.
type SimulationExpectationFn =
    Arc<dyn Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static>;

#[derive(Clone)]
pub struct SimulationExpectation(SimulationExpectationFn);

impl std::fmt::Debug for SimulationExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationExpectation").finish()
    }
}

impl SimulationExpectation {
    /// # Errors
    ///
    /// Whatever the wrapped check reports.
    pub fn evaluate(&self, summary: &SimulationSummary) -> Result<()> {
        (self.0)(summary)
    }
}

impl<F> From<F> for SimulationExpectation
where
    F: Fn(&SimulationSummary) -> Result<()> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self(Arc::new(f))
    }
}

/// Everything a scenario expectation can look at after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub profile: PlayerProfile,
    pub turns: usize,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    pub points_earned: u64,
    pub starting_score: u64,
    pub final_score: u64,
    pub final_position: Position,
    pub stage_changes: usize,
    pub hardest_category: DifficultyCategory,
    pub violations: Vec<String>,
}

/// Play `plan` against a fresh session and audit every step.
pub fn run_simulation<S: ProgressStore>(
    plan: &SimulationPlan,
    config: &GameConfig,
    store: S,
    seed: u64,
) -> SimulationSummary {
    let mut session = PracticeSession::with_seed(config.clone(), store, seed);
    let mut player = plan.profile.create_player(seed);
    let starting_score = session.score();
    let mut prev_position = session.position();
    let mut points_earned = 0_u64;
    let mut stage_changes = 0;
    let mut hardest_category = DifficultyCategory::SuperEasy;
    let mut violations = Vec::new();

    for turn in 0..plan.turns {
        if let Some(op) = plan.operation_for_turn(turn) {
            session.select_operation(op);
        }
        let question = *session.question();
        if let Err(err) = check_question(&question) {
            violations.push(format!("turn {turn}: {err}"));
        }
        let category = question.category();
        hardest_category = hardest_category.max(category);

        match player.decide(session.can_skip()) {
            PlayerAction::Skip => {
                let score_before = session.score();
                session.skip();
                if session.score() != score_before {
                    violations.push(format!("turn {turn}: skip changed the score"));
                }
            }
            PlayerAction::AnswerWrongly => {
                match session.submit_value(question.answer() + 1.0) {
                    Ok(outcome) if outcome.correct || outcome.points_awarded != 0 => {
                        violations.push(format!("turn {turn}: wrong answer scored"));
                    }
                    Ok(_) => {}
                    Err(err) => violations.push(format!("turn {turn}: {err}")),
                }
                if *session.question() != question {
                    violations.push(format!("turn {turn}: wrong answer advanced the question"));
                }
            }
            PlayerAction::AnswerCorrectly => {
                let text = question.answer().to_string();
                match session.submit_answer(&text) {
                    Ok(outcome) if outcome.correct => {
                        let expected = config.scoring.points_for(category);
                        if outcome.points_awarded != expected {
                            violations.push(format!(
                                "turn {turn}: {category} awarded {} not {expected}",
                                outcome.points_awarded
                            ));
                        }
                        points_earned += u64::from(outcome.points_awarded);
                        if outcome.stage_changed {
                            stage_changes += 1;
                        }
                    }
                    Ok(_) => violations.push(format!("turn {turn}: {question} = {text} rejected")),
                    Err(err) => violations.push(format!("turn {turn}: {err}")),
                }
            }
        }

        let position = session.position();
        if position.rank < prev_position.rank || position.stage_index < prev_position.stage_index {
            violations.push(format!(
                "turn {turn}: position went backwards ({:?} -> {:?})",
                prev_position, position
            ));
        }
        prev_position = position;
    }

    if session.score() != starting_score + points_earned {
        violations.push(format!(
            "score {} does not match {starting_score} + {points_earned}",
            session.score()
        ));
    }

    let stats = session.stats();
    log::debug!(
        "seed {seed} profile {} finished at {}",
        plan.profile,
        prev_position.stage_label()
    );

    SimulationSummary {
        seed,
        profile: plan.profile,
        turns: plan.turns,
        correct: stats.correct,
        wrong: stats.wrong,
        skipped: stats.skipped,
        points_earned,
        starting_score,
        final_score: session.score(),
        final_position: session.position(),
        stage_changes,
        hardest_category,
        violations,
    }
}

/// Range and exactness rules every generated question must satisfy.
///
/// # Errors
///
/// Returns a description of the first broken rule.
pub fn check_question(question: &Question) -> Result<(), String> {
    let Question { a, b, operation } = *question;
    let ok = match operation {
        Operation::Addition => a <= 30 && b <= 30,
        Operation::Subtraction => a >= b && a <= 30,
        Operation::Multiplication => a <= 10 && b <= 10,
        Operation::Division => {
            (1..=10).contains(&b) && a % b == 0 && (1..=10).contains(&(a / b))
        }
    };
    if ok {
        Ok(())
    } else {
        Err(format!("generated question {question} breaks its range rules"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critter_math_game::{MemoryStore, NullStore, SavedProgress};

    #[test]
    fn perfect_run_scores_every_turn() {
        let plan = SimulationPlan::new(PlayerProfile::Perfect, 100);
        let summary = run_simulation(&plan, &GameConfig::default(), NullStore, 1337);
        assert!(summary.violations.is_empty(), "{:?}", summary.violations);
        assert_eq!(summary.correct, 100);
        assert_eq!(summary.final_score, summary.points_earned);
        assert_eq!(summary.stage_changes, summary.final_position.stage_index);
    }

    #[test]
    fn rotation_switches_operations() {
        let plan = SimulationPlan::new(PlayerProfile::Stubborn, 40)
            .rotating(&[Operation::Division, Operation::Subtraction], 10);
        assert_eq!(plan.operation_for_turn(0), Some(Operation::Division));
        assert_eq!(plan.operation_for_turn(5), None);
        assert_eq!(plan.operation_for_turn(10), Some(Operation::Subtraction));
        assert_eq!(plan.operation_for_turn(20), Some(Operation::Division));
        let summary = run_simulation(&plan, &GameConfig::default(), NullStore, 9);
        assert!(summary.violations.is_empty(), "{:?}", summary.violations);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn resumed_run_counts_from_stored_score() {
        let store = MemoryStore::with_progress(SavedProgress::new(500, Operation::Addition));
        let plan = SimulationPlan::new(PlayerProfile::Steady, 60);
        let summary = run_simulation(&plan, &GameConfig::default(), store.clone(), 4);
        assert_eq!(summary.starting_score, 500);
        assert_eq!(summary.final_score, 500 + summary.points_earned);
        assert_eq!(store.snapshot().map(|p| p.score), Some(summary.final_score));
    }

    #[test]
    fn expectations_see_the_summary() {
        let plan = SimulationPlan::new(PlayerProfile::Perfect, 5).with_expectation(
            |summary: &SimulationSummary| {
                anyhow::ensure!(summary.correct == 5, "expected five correct answers");
                Ok(())
            },
        );
        let summary = run_simulation(&plan, &GameConfig::default(), NullStore, 3);
        assert!(plan.expectations.iter().all(|e| e.evaluate(&summary).is_ok()));
    }

    #[test]
    fn check_question_flags_bad_operands() {
        assert!(check_question(&Question::new(3, 9, Operation::Subtraction)).is_err());
        assert!(check_question(&Question::new(7, 2, Operation::Division)).is_err());
        assert!(check_question(&Question::new(12, 4, Operation::Division)).is_ok());
    }
}
