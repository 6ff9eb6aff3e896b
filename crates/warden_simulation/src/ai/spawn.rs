//! Спавн агента: waypoints + AiAgent + первая patrol точка

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::components::AiAgent;
use crate::ai::world::TargetLookup;
use crate::components::{Damageable, Health, Waypoint};
use crate::config::{AgentConfig, ConfigError};
use crate::perception::Collider;
use crate::DeterministicRng;

/// Радиус коллайдера агента (блокирует чужой line-of-sight)
pub const AGENT_RADIUS: f32 = 0.25;

/// TargetLookup поверх `&World` (вне систем: спавн, тесты)
pub struct WorldLookup<'a>(pub &'a World);

impl TargetLookup for WorldLookup<'_> {
    fn position_of(&self, entity: Entity) -> Option<Vec2> {
        let transform = self.0.get::<Transform>(entity)?;
        match self.0.get::<Health>(entity) {
            Some(health) if !health.is_alive() => None,
            _ => Some(transform.translation.truncate()),
        }
    }

    fn is_damageable(&self, entity: Entity) -> bool {
        self.0.get::<Health>(entity).is_some_and(|health| health.is_alive())
    }
}

/// Спавнит waypoints из `config.patrol_points` и самого агента в `position`
///
/// Ошибка только на невалидных числах; configuration gaps логируются warning'ами.
pub fn spawn_agent(world: &mut World, config: &AgentConfig, position: Vec2) -> Result<Entity, ConfigError> {
    let warnings = config.validate()?;
    for warning in &warnings {
        crate::log_warning(&format!("AI spawn at {}: {}", position, warning));
    }

    let waypoints: Vec<Entity> = config
        .patrol_positions()
        .map(|point| world.spawn((Waypoint, Transform::from_translation(point.extend(0.0)))).id())
        .collect();

    let mut agent = AiAgent::new(config, waypoints);

    if world.contains_resource::<DeterministicRng>() {
        world.resource_scope(|world, mut rng: Mut<DeterministicRng>| {
            agent.init_patrol(&WorldLookup(world), &mut rng.rng);
        });
    } else {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        agent.init_patrol(&WorldLookup(world), &mut rng);
    }

    let entity = world
        .spawn((
            agent,
            Transform::from_translation(position.extend(0.0)),
            Collider::Circle { radius: AGENT_RADIUS },
        ))
        .id();

    crate::log_info(&format!("AI: spawned agent {:?} at {}", entity, position));
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::components::AIState;
    use crate::components::Velocity;

    #[test]
    fn test_spawn_agent_with_patrol_points() {
        let mut world = World::new();
        world.insert_resource(DeterministicRng::new(1));

        let config = AgentConfig {
            patrol_enabled: true,
            patrol_points: vec![[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]],
            ..default()
        };
        let entity = spawn_agent(&mut world, &config, Vec2::new(1.0, 1.0)).expect("valid config");

        let agent = world.get::<AiAgent>(entity).expect("agent component");
        assert_eq!(agent.patrol.points.len(), 3);
        assert!(agent.patrol.enabled);
        let first = agent.patrol.patrol_target.expect("first waypoint chosen");
        assert!(agent.patrol.points.contains(&first));
        assert!(world.get::<Waypoint>(first).is_some());
        assert_eq!(agent.state(), AIState::Idle);
        assert!(agent.registry_fallback);

        // Required component
        assert_eq!(world.get::<Velocity>(entity), Some(&Velocity(Vec2::ZERO)));
    }

    #[test]
    fn test_spawn_agent_without_points_disables_patrol() {
        let mut world = World::new();

        let config = AgentConfig {
            patrol_enabled: true,
            ..default()
        };
        let entity = spawn_agent(&mut world, &config, Vec2::ZERO).expect("gaps are not errors");

        let agent = world.get::<AiAgent>(entity).expect("agent component");
        assert!(!agent.patrol.enabled);
        assert_eq!(agent.patrol.patrol_target, None);
    }

    #[test]
    fn test_spawn_agent_rejects_invalid_numbers() {
        let mut world = World::new();

        let config = AgentConfig {
            move_speed: f32::INFINITY,
            ..default()
        };

        assert!(spawn_agent(&mut world, &config, Vec2::ZERO).is_err());
        assert_eq!(world.entities().len(), 0);
    }

    #[test]
    fn test_world_lookup_hides_dead_entities() {
        let mut world = World::new();
        let alive = world.spawn((Transform::from_xyz(1.0, 2.0, 0.0), Health::new(5.0))).id();
        let dead = world
            .spawn((
                Transform::default(),
                Health {
                    current: 0.0,
                    max: 5.0,
                },
            ))
            .id();
        let marker = world.spawn((Waypoint, Transform::from_xyz(4.0, 0.0, 0.0))).id();

        let lookup = WorldLookup(&world);
        assert_eq!(lookup.position_of(alive), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(lookup.position_of(dead), None);
        assert_eq!(lookup.position_of(marker), Some(Vec2::new(4.0, 0.0)));
        assert!(lookup.is_damageable(alive));
        assert!(!lookup.is_damageable(marker));
    }
}
