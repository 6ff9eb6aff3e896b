//! Headless симуляция Warden
//!
//! `warden_simulation [scenario.toml]`: без аргумента гоняет встроенный демо-сценарий.

use std::path::PathBuf;
use std::process::ExitCode;

use warden_simulation::scenario::{build_scenario_app, run_frames};
use warden_simulation::{init_logger, log_error, log_info, AIState, ScenarioConfig};

fn main() -> ExitCode {
    init_logger();

    let scenario = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match ScenarioConfig::from_file(&path) {
            Ok(scenario) => scenario,
            Err(error) => {
                log_error(&format!("Scenario {}: {}", path.display(), error));
                return ExitCode::FAILURE;
            }
        },
        None => ScenarioConfig::default(),
    };

    log_info(&format!(
        "Starting Warden headless simulation (seed: {}, frames: {}, agents: {})",
        scenario.seed,
        scenario.frames,
        scenario.agents.len()
    ));

    let (mut app, _) = match build_scenario_app(&scenario) {
        Ok(built) => built,
        Err(error) => {
            log_error(&format!("Scenario spawn failed: {}", error));
            return ExitCode::FAILURE;
        }
    };

    let report = run_frames(&mut app, scenario.frames);

    log_info(&format!(
        "Simulation complete: {} frames, {} transitions (follow {}, attack {}, patrol {}, idle {}), {} hits, {} kills",
        report.frames,
        report.transitions.len(),
        report.entered(AIState::Follow),
        report.entered(AIState::Attack),
        report.entered(AIState::Patrol),
        report.entered(AIState::Idle),
        report.hits.len(),
        report.deaths.len()
    ));

    ExitCode::SUCCESS
}
