use colored::Colorize;
use critter_math_game::{GameConfig, MemoryStore, SavedProgress};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::logic::scenarios::{ScenarioKind, TestScenario};
use crate::logic::simulation::{SimulationPlan, SimulationSummary, run_simulation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    config: GameConfig,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(config: GameConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {})",
                    scenario.name.bright_white(),
                    seed
                );
            }

            results.push(self.run_single_scenario(scenario, seed, iterations));
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            let outcome = match &scenario.kind {
                ScenarioKind::Simulation(plan) => self.run_plan(plan, iteration_seed),
                ScenarioKind::Check(check) => {
                    check(&self.config, iteration_seed).map_err(|err| format!("{err:#}"))
                }
            };

            match outcome {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?})",
                            i + 1,
                            iterations
                        );
                    }
                }
                Err(err) => {
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            err.clone().red()
                        );
                    }
                    failures.push(format!("Iteration {} (seed {iteration_seed}): {err}", i + 1));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }

    fn run_plan(&self, plan: &SimulationPlan, seed: u64) -> Result<(), String> {
        let store = if plan.starting_score > 0 {
            MemoryStore::with_progress(SavedProgress::new(
                plan.starting_score,
                plan.first_operation(),
            ))
        } else {
            MemoryStore::default()
        };
        let summary = run_simulation(plan, &self.config, store, seed);

        if !summary.violations.is_empty() {
            return Err(format!(
                "{} | {}",
                summary.violations.join("; "),
                describe(&summary)
            ));
        }
        for expectation in &plan.expectations {
            if let Err(err) = expectation.evaluate(&summary) {
                return Err(format!("{err:#} | {}", describe(&summary)));
            }
        }
        if self.verbose {
            println!("     ↳ {}", describe(&summary));
        }
        Ok(())
    }
}

fn describe(summary: &SimulationSummary) -> String {
    format!(
        "seed {} profile {} | turns {} | correct {} wrong {} skipped {} | hardest {} | score {} | {} {}",
        summary.seed,
        summary.profile,
        summary.turns,
        summary.correct,
        summary.wrong,
        summary.skipped,
        summary.hardest_category,
        summary.final_score,
        summary.final_position.stage_label(),
        summary.final_position.rank_meter()
    )
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|millis| Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
            .collect())
    }
}
