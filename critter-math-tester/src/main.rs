mod logic;
mod store;
mod util;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use critter_math_game::{GameConfig, ProgressStore, stage_table};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{
    LogicTester, PlayerProfile, ScenarioResult, SimulationPlan, all_keys, get_scenario,
    list_scenarios, resolve_seed_inputs, run_simulation,
};
use store::JsonFileStore;
use util::{OutputTarget, split_csv};

const PRACTICE_TURNS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "critter-math-tester", version)]
#[command(about = "Seeded simulation and invariant checks for the Critter Math engine")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Print the stage table and exit
    #[arg(long)]
    stages: bool,

    /// Seeds to run (comma-separated integers or `a..b` ranges)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Game config JSON replacing the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Progress file for a practice run that resumes across invocations
    #[arg(long)]
    save: Option<PathBuf>,

    /// Player profile used for the practice run
    #[arg(long, value_enum, default_value_t = PlayerProfile::Steady)]
    profile: PlayerProfile,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? || maybe_print_stages(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;

    let results = run_logic_scenarios(&args, &config, &scenarios, &seeds);

    if let Some(path) = &args.save {
        run_practice(path, args.profile, &config, seeds.first().copied().unwrap_or(1337))?;
    }

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target, "  {key:25} - {description}")?;
    }
    output_target.flush()?;
    Ok(true)
}

fn maybe_print_stages(args: &Args) -> Result<bool> {
    if !args.stages {
        return Ok(false);
    }
    let table = stage_table();
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target, "{:>5}  {:<28} {:>7} {:>9}", "Stage", "Name", "Ranks", "Reached")?;
    for (idx, ((name, delta), threshold)) in table
        .names()
        .iter()
        .zip(table.deltas())
        .zip(table.thresholds())
        .enumerate()
    {
        let reached_at = threshold - delta;
        writeln!(
            output_target,
            "{:>5}  {name:<28} {delta:>7} {reached_at:>9}",
            idx + 1
        )?;
    }
    output_target.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🐾 Critter Math Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GameConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn run_logic_scenarios(
    args: &Args,
    config: &GameConfig,
    scenarios: &[String],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(config.clone(), args.verbose);
    let mut results = Vec::new();
    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.extend(tester.run_scenario(&scenario, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }
    results
}

fn run_practice(path: &Path, profile: PlayerProfile, config: &GameConfig, seed: u64) -> Result<()> {
    let store = JsonFileStore::new(path);
    let previous = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?
        .map_or(0, |saved| saved.score);

    let plan = SimulationPlan::new(profile, PRACTICE_TURNS).resuming();
    let summary = run_simulation(&plan, config, store, seed);
    if !summary.violations.is_empty() {
        bail!("practice run broke invariants: {}", summary.violations.join("; "));
    }

    println!(
        "💾 Practice ({profile}) saved to {}: score {previous} -> {} | {} {}",
        path.display(),
        summary.final_score,
        summary.final_position.stage_label(),
        summary.final_position.rank_meter()
    );
    Ok(())
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            logic::reports::generate_markdown_report(&mut output_target, results)?;
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(output_target)?;
            writeln!(output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_to_every_scenario_once() {
        let scenarios = expand_scenarios("smoke,all");
        assert_eq!(scenarios.first().map(String::as_str), Some("smoke"));
        assert_eq!(scenarios.len(), all_keys().len());
    }

    #[test]
    fn args_parse_ranges_and_formats() {
        let args = Args::parse_from([
            "critter-math-tester",
            "--seeds",
            "1..3",
            "--report",
            "markdown",
            "--iterations",
            "2",
        ]);
        assert_eq!(args.report, ReportFormat::Markdown);
        assert_eq!(
            resolve_seed_inputs(&split_csv(&args.seeds)).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn missing_config_path_is_an_error() {
        assert!(load_config(Some(Path::new("/definitely/not/here.json"))).is_err());
        assert!(load_config(None).is_ok());
    }
}
