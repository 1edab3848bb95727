pub mod policy;
pub mod reports;
pub mod scenarios;
pub mod seeds;
pub mod simulation;
pub mod tester;

pub use policy::PlayerProfile;
pub use scenarios::{all_keys, get_scenario, list_scenarios};
pub use seeds::resolve_seed_inputs;
pub use simulation::{SimulationPlan, run_simulation};
pub use tester::{LogicTester, ScenarioResult};
