//! Headless сценарии: спавн мира из ScenarioConfig и прогон кадров

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::ai::{spawn_agent, AIState, AiStateChanged};
use crate::combat::{DamageDealt, EntityDied};
use crate::components::{Followable, Health, Velocity};
use crate::config::{ConfigError, ScenarioConfig};
use crate::perception::Collider;
use crate::{create_headless_app, SimulationPlugin};

/// Followable target: Health + circle collider + постоянная скорость
pub fn spawn_target(world: &mut World, position: Vec2, health: f32, radius: f32, velocity: Vec2) -> Entity {
    world
        .spawn((
            Followable,
            Health::new(health),
            Collider::Circle { radius },
            Transform::from_translation(position.extend(0.0)),
            Velocity(velocity),
        ))
        .id()
}

/// Стена: блокирует line-of-sight
pub fn spawn_obstacle(world: &mut World, position: Vec2, half_extents: Vec2) -> Entity {
    world
        .spawn((
            Collider::Rect { half_extents },
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Entity, заспавненные сценарием (в порядке конфига)
#[derive(Debug, Default, Clone)]
pub struct SpawnedScenario {
    pub agents: Vec<Entity>,
    pub targets: Vec<Entity>,
    pub obstacles: Vec<Entity>,
}

/// Targets спавнятся первыми: порядок в CandidateRegistry = порядок в конфиге
pub fn spawn_scenario(world: &mut World, scenario: &ScenarioConfig) -> Result<SpawnedScenario, ConfigError> {
    scenario.validate()?;

    let mut spawned = SpawnedScenario::default();

    for target in &scenario.targets {
        spawned.targets.push(spawn_target(
            world,
            Vec2::from_array(target.position),
            target.health,
            target.radius,
            Vec2::from_array(target.velocity),
        ));
    }

    for obstacle in &scenario.obstacles {
        spawned.obstacles.push(spawn_obstacle(
            world,
            Vec2::from_array(obstacle.position),
            Vec2::from_array(obstacle.half_extents),
        ));
    }

    for agent in &scenario.agents {
        spawned
            .agents
            .push(spawn_agent(world, &agent.config, Vec2::from_array(agent.position))?);
    }

    Ok(spawned)
}

/// App под сценарий: seed, частота physical tick, фиксированная длина кадра
pub fn build_scenario_app(scenario: &ScenarioConfig) -> Result<(App, SpawnedScenario), ConfigError> {
    let mut app = create_headless_app(scenario.seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(Time::<Fixed>::from_hz(scenario.tick_hz))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(scenario.frame_ms)));

    let spawned = spawn_scenario(app.world_mut(), scenario)?;
    Ok((app, spawned))
}

/// Итог прогона
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScenarioReport {
    pub frames: u32,
    pub transitions: Vec<AiStateChanged>,
    pub hits: Vec<DamageDealt>,
    pub deaths: Vec<EntityDied>,
}

impl ScenarioReport {
    /// Сколько раз какой-либо агент входил в `state`
    pub fn entered(&self, state: AIState) -> usize {
        self.transitions.iter().filter(|change| change.to == state).count()
    }
}

/// Гоняет `frames` кадров, собирая переходы, попадания и смерти
pub fn run_frames(app: &mut App, frames: u32) -> ScenarioReport {
    let mut report = ScenarioReport::default();

    for _ in 0..frames {
        app.update();
        report.frames += 1;

        let world = app.world_mut();
        report
            .transitions
            .extend(world.resource_mut::<Events<AiStateChanged>>().drain());
        report.hits.extend(world.resource_mut::<Events<DamageDealt>>().drain());
        report.deaths.extend(world.resource_mut::<Events<EntityDied>>().drain());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CandidateRegistry;
    use crate::config::{AgentSpawn, TargetSpawn};

    #[test]
    fn test_spawn_scenario_registers_targets_in_order() {
        let scenario = ScenarioConfig {
            frames: 1,
            agents: vec![AgentSpawn {
                position: [0.0, 0.0],
                config: default(),
            }],
            targets: vec![
                TargetSpawn {
                    position: [20.0, 0.0],
                    ..default()
                },
                TargetSpawn {
                    position: [30.0, 0.0],
                    ..default()
                },
            ],
            obstacles: Vec::new(),
            ..default()
        };

        let (mut app, spawned) = build_scenario_app(&scenario).expect("valid scenario");
        assert_eq!(spawned.agents.len(), 1);

        run_frames(&mut app, 1);

        assert_eq!(app.world().resource::<CandidateRegistry>().targets(), spawned.targets.as_slice());
    }

    #[test]
    fn test_default_scenario_runs() {
        let scenario = ScenarioConfig {
            frames: 30,
            ..default()
        };

        let (mut app, spawned) = build_scenario_app(&scenario).expect("default scenario is valid");
        let report = run_frames(&mut app, scenario.frames);

        assert_eq!(report.frames, 30);
        assert_eq!(spawned.agents.len(), 2);
        // Оба агента выходят из Idle в первый же кадр
        assert!(report.transitions.len() >= 2);
    }
}
