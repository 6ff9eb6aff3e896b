//! Configuration gaps логируются warning'ами, симуляция продолжается
//!
//! Отдельный test binary: глобальный logger подменяется на MemoryLogger.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use warden_simulation::logger::MemoryLogger;
use warden_simulation::scenario::run_frames;
use warden_simulation::*;

#[test]
fn test_configuration_gaps_are_warnings() {
    let sink = MemoryLogger::new();
    set_logger(Box::new(sink.clone()));

    let mut app = create_headless_app(1);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)));

    let config = AgentConfig {
        follow_enabled: false,
        attack_enabled: true,
        patrol_enabled: true,
        ..default()
    };
    let agent = spawn_agent(app.world_mut(), &config, Vec2::ZERO).expect("gaps are not errors");

    assert_eq!(sink.count_matching(LogLevel::Warning, "no patrol points set"), 2);
    assert_eq!(sink.count_matching(LogLevel::Warning, "attack enabled without follow"), 1);
    assert_eq!(sink.count_matching(LogLevel::Warning, "candidate registry"), 1);
    assert_eq!(sink.count_matching(LogLevel::Warning, "patrol disabled"), 1);

    run_frames(&mut app, 20);

    let agent = app.world().get::<AiAgent>(agent).expect("agent still alive");
    assert_eq!(agent.state(), AIState::Idle);
    assert!(sink.count_matching(LogLevel::Error, "") == 0);
}
