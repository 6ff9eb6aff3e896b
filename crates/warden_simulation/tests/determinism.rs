//! Тесты детерминизма
//!
//! Сценарий с одинаковым seed даёт идентичный мир: позиции, состояния агентов,
//! выбранные patrol waypoints (RNG) и таймстемпы cooldown'ов.

use bevy::prelude::*;
use warden_simulation::config::{AgentSpawn, ScenarioConfig};
use warden_simulation::scenario::{build_scenario_app, run_frames};
use warden_simulation::{world_snapshot, AgentConfig, AiAgent};

/// Несколько патрульных с общим RNG + демо-сценарий
fn busy_scenario(seed: u64) -> ScenarioConfig {
    let mut scenario = ScenarioConfig {
        seed,
        ..default()
    };

    for i in 0..4 {
        let offset = i as f32 * 2.0;
        scenario.agents.push(AgentSpawn {
            position: [offset, -10.0],
            config: AgentConfig {
                follow_enabled: false,
                patrol_enabled: true,
                patrol_delay: 0.1,
                patrol_points: vec![
                    [offset, -12.0],
                    [offset + 1.5, -12.0],
                    [offset + 1.5, -10.5],
                    [offset, -10.5],
                ],
                ..default()
            },
        });
    }

    scenario
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64, frames: u32) -> Vec<u8> {
    let scenario = busy_scenario(seed);
    let (mut app, _) = build_scenario_app(&scenario).expect("valid scenario");

    run_frames(&mut app, frames);

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<Transform>(world);
    snapshot.extend(world_snapshot::<AiAgent>(world));
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const FRAMES: u32 = 400;

    let snapshot1 = run_simulation(SEED, FRAMES);
    let snapshot2 = run_simulation(SEED, FRAMES);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const FRAMES: u32 = 200;

    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, FRAMES)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}
