use anyhow::{Result, bail, ensure};
use critter_math_game::{
    DifficultyCategory, GameConfig, MemoryStore, Operation, PracticeSession, ProgressStore,
    Question, ScoringTable, classify, position, stage_table,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::logic::policy::PlayerProfile;
use crate::logic::simulation::{SimulationPlan, SimulationSummary, check_question, run_simulation};

const GENERATOR_DRAWS: usize = 2_000;
const PROGRESSION_SWEEP_MAX: u64 = 25_000;

/// Seed-only check that does not need a simulated player.
pub type ScenarioCheck = fn(&GameConfig, u64) -> Result<()>;

#[derive(Debug, Clone)]
pub enum ScenarioKind {
    Simulation(SimulationPlan),
    Check(ScenarioCheck),
}

#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ScenarioKind,
}

impl TestScenario {
    fn simulation(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        plan: SimulationPlan,
    ) -> Self {
        Self {
            key,
            name,
            description,
            kind: ScenarioKind::Simulation(plan),
        }
    }

    fn check(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        check: ScenarioCheck,
    ) -> Self {
        Self {
            key,
            name,
            description,
            kind: ScenarioKind::Check(check),
        }
    }
}

pub fn catalog() -> Vec<TestScenario> {
    vec![
        TestScenario::simulation(
            "smoke",
            "Smoke",
            "Steady player answers 50 addition questions",
            SimulationPlan::new(PlayerProfile::Steady, 50).with_expectation(smoke_expectation),
        ),
        TestScenario::check(
            "generator-invariants",
            "Generator Invariants",
            "Operand ranges and exact division for every operation",
            generator_invariants,
        ),
        TestScenario::check(
            "classifier-boundaries",
            "Classifier Boundaries",
            "Category edges and points for each operation",
            classifier_boundaries,
        ),
        TestScenario::check(
            "progression-monotonic",
            "Progression Monotonic",
            "Rank and stage never decrease as the score grows",
            progression_monotonic,
        ),
        TestScenario::check(
            "session-persistence",
            "Session Persistence",
            "Stored progress survives a restart and wrong answers never write",
            session_persistence,
        ),
        TestScenario::simulation(
            "full-climb",
            "Full Climb",
            "Perfect player finishes the last stages across all operations",
            SimulationPlan::new(PlayerProfile::Perfect, 3_000)
                .rotating(&Operation::ALL, 250)
                .with_starting_score(590_000)
                .with_expectation(full_climb_expectation),
        ),
        TestScenario::simulation(
            "struggling-player",
            "Struggling Player",
            "Frequent wrong answers and skips on hard division",
            SimulationPlan::new(PlayerProfile::Struggling, 200)
                .rotating(&[Operation::Division, Operation::Multiplication], 50)
                .with_expectation(struggling_expectation),
        ),
    ]
}

/// Keys and descriptions for `--list-scenarios`.
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub fn get_scenario(key: &str) -> Option<TestScenario> {
    catalog().into_iter().find(|scenario| scenario.key == key)
}

/// Every scenario key, in catalog order.
pub fn all_keys() -> Vec<String> {
    catalog()
        .into_iter()
        .map(|scenario| scenario.key.to_string())
        .collect()
}

fn smoke_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(summary.correct > 0, "no question was answered correctly");
    ensure!(
        summary.final_score == summary.starting_score + summary.points_earned,
        "score drifted from awarded points"
    );
    Ok(())
}

fn full_climb_expectation(summary: &SimulationSummary) -> Result<()> {
    let last = stage_table().last_index();
    ensure!(
        summary.final_position.stage_index == last,
        "climb stopped at {}",
        summary.final_position.stage_label()
    );
    ensure!(
        summary.stage_changes == last - position(summary.starting_score).stage_index,
        "expected one stage change per stage climbed, saw {}",
        summary.stage_changes
    );
    ensure!(
        summary.final_position.stage_progress_ratio() <= 1.0,
        "progress ratio exceeded 1"
    );
    Ok(())
}

fn struggling_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(summary.wrong > 0, "struggling player never missed");
    ensure!(
        summary.correct + summary.wrong + summary.skipped
            == u32::try_from(summary.turns).unwrap_or(u32::MAX),
        "turn counters do not add up"
    );
    Ok(())
}

fn generator_invariants(_config: &GameConfig, seed: u64) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for op in Operation::ALL {
        for _ in 0..GENERATOR_DRAWS {
            let question = Question::generate(op, &mut rng);
            if let Err(err) = check_question(&question) {
                bail!(err);
            }
        }
    }
    Ok(())
}

fn classifier_boundaries(config: &GameConfig, _seed: u64) -> Result<()> {
    use DifficultyCategory::{Easy, Einstein, ExtraHard, Hard, Normal, Simple, SuperEasy};
    let cases = [
        (0, 0, Operation::Addition, SuperEasy),
        (2, 5, Operation::Addition, SuperEasy),
        (6, 3, Operation::Addition, Easy),
        (5, 9, Operation::Addition, Simple),
        (13, 10, Operation::Addition, Normal),
        (17, 15, Operation::Addition, Hard),
        (21, 20, Operation::Addition, ExtraHard),
        (26, 21, Operation::Addition, Einstein),
        (5, 5, Operation::Subtraction, SuperEasy),
        (15, 8, Operation::Subtraction, Easy),
        (20, 8, Operation::Subtraction, Simple),
        (20, 4, Operation::Subtraction, Normal),
        (20, 3, Operation::Subtraction, Hard),
        (30, 5, Operation::Subtraction, ExtraHard),
        (30, 0, Operation::Subtraction, Einstein),
        (2, 5, Operation::Multiplication, SuperEasy),
        (4, 5, Operation::Multiplication, Easy),
        (5, 6, Operation::Multiplication, Simple),
        (5, 8, Operation::Multiplication, Normal),
        (7, 7, Operation::Multiplication, Hard),
        (6, 10, Operation::Multiplication, ExtraHard),
        (7, 9, Operation::Multiplication, Einstein),
        (4, 2, Operation::Division, SuperEasy),
        (9, 3, Operation::Division, Easy),
        (12, 4, Operation::Division, Simple),
        (25, 5, Operation::Division, Normal),
        (42, 6, Operation::Division, Hard),
        (49, 7, Operation::Division, ExtraHard),
        (72, 8, Operation::Division, Einstein),
    ];
    for (a, b, op, expected) in cases {
        let got = classify(a, b, op);
        ensure!(got == expected, "{a} {op} {b} classified {got}, expected {expected}");
        let points = config.scoring.points_for(got);
        ensure!(points >= 1, "{got} is worth no points");
    }
    let tiered = ScoringTable::tiered();
    ensure!(
        tiered.points_for(Einstein) >= tiered.points_for(SuperEasy),
        "tiered scoring is not ordered"
    );
    Ok(())
}

fn progression_monotonic(_config: &GameConfig, seed: u64) -> Result<()> {
    let mut prev = position(0);
    ensure!(prev.rank == 0 && prev.stage_index == 0, "score 0 is not the start");
    let step = 1 + seed % 7;
    let mut score = 0;
    while score <= PROGRESSION_SWEEP_MAX {
        let pos = position(score);
        ensure!(pos.rank >= prev.rank, "rank fell at score {score}");
        ensure!(pos.stage_index >= prev.stage_index, "stage fell at score {score}");
        ensure!(pos.progress_in_rank < 10, "rank progress overflowed at {score}");
        let meter = pos.rank_meter();
        ensure!(meter.filled + meter.empty <= 10, "meter too wide at {score}");
        ensure!(position(score) == pos, "position is not stable at {score}");
        prev = pos;
        score += step;
    }
    let end = position(u64::MAX);
    ensure!(
        end.stage_index == stage_table().last_index(),
        "huge score did not reach the last stage"
    );
    Ok(())
}

fn session_persistence(config: &GameConfig, seed: u64) -> Result<()> {
    let store = MemoryStore::default();
    let plan = SimulationPlan::new(PlayerProfile::Steady, 40)
        .rotating(&[Operation::Subtraction], 40);
    let summary = run_simulation(&plan, config, store.clone(), seed);
    ensure!(summary.violations.is_empty(), "{}", summary.violations.join("; "));

    let saved = store.load()?;
    ensure!(
        saved.map(|p| p.score) == Some(summary.final_score),
        "stored score does not match the session"
    );

    let mut resumed = PracticeSession::with_seed(config.clone(), store.clone(), seed ^ 1);
    ensure!(resumed.score() == summary.final_score, "resume lost the score");
    ensure!(
        resumed.operation() == Operation::Subtraction,
        "resume lost the operation"
    );

    let writes = store.write_count();
    let wrong = resumed.question().answer() + 1.0;
    let outcome = resumed.submit_value(wrong)?;
    ensure!(!outcome.correct, "wrong answer accepted");
    ensure!(
        resumed.submit_value(f64::NAN).is_err(),
        "NaN answer was graded"
    );
    ensure!(store.write_count() == writes, "wrong answer wrote progress");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique_and_findable() {
        let keys = all_keys();
        for key in &keys {
            assert!(get_scenario(key).is_some(), "{key}");
        }
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), keys.len());
        assert!(get_scenario("missing").is_none());
    }

    #[test]
    fn check_scenarios_pass_with_defaults() {
        let config = GameConfig::default();
        for scenario in catalog() {
            if let ScenarioKind::Check(check) = scenario.kind {
                check(&config, 1337).unwrap_or_else(|err| panic!("{}: {err}", scenario.key));
            }
        }
    }
}
