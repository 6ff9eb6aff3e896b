//! Physical tick system

use bevy::prelude::*;

use crate::ai::components::AiAgent;
use crate::ai::dispatcher::ActionOutcome;
use crate::ai::systems::view::{BodyMotion, CombatView, CombatWorld};
use crate::combat::{DamageDealt, EntityDied};
use crate::components::Velocity;
use crate::perception::{Collider, ColliderPerception};
use crate::DeterministicRng;

/// Система: physical tick, действие последнего вычисленного состояния
///
/// Крутится в FixedUpdate (fixed clock). Урон копится за проход и пишется
/// событиями после цикла; despawn мёртвых: позже, в `despawn_dead`.
pub fn execute_ai_actions(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut agents: Query<(Entity, &mut AiAgent, &Transform, &mut Velocity)>,
    mut combat: CombatWorld,
    colliders: Query<(Entity, &'static Transform, &'static Collider)>,
    mut damage_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    let now = time.elapsed_secs();
    let mut hits = Vec::new();

    for (entity, mut agent, transform, velocity) in agents.iter_mut() {
        let perception = ColliderPerception {
            colliders: &colliders,
            exclude: Some(entity),
        };
        let mut body = BodyMotion {
            position: transform.translation.truncate(),
            velocity,
        };
        let mut world = CombatView {
            world: &mut combat,
            attacker: entity,
            hits: &mut hits,
        };

        let outcome = agent.fixed_tick(now, &mut world, &perception, &mut body, &mut rng.rng);
        log_outcome(entity, &outcome);
    }

    for hit in hits {
        if hit.target_died {
            crate::log_info(&format!("Combat: {:?} killed by {:?}", hit.target, hit.attacker));
            died_events.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.attacker),
            });
        }
        damage_events.write(hit);
    }
}

fn log_outcome(entity: Entity, outcome: &ActionOutcome) {
    match outcome {
        ActionOutcome::TargetLost { target } => {
            crate::log(&format!("AI: {:?} lost target {:?}", entity, target));
        }
        ActionOutcome::Attacked { target, damage } => {
            crate::log(&format!("AI: {:?} hit {:?} for {:.1}", entity, target, damage));
        }
        ActionOutcome::WaypointReached { reached, next } => {
            crate::log(&format!("AI: {:?} reached waypoint {:?}, next {:?}", entity, reached, next));
        }
        // Шумные/ожидаемые исходы не логируем
        ActionOutcome::Idle
        | ActionOutcome::Moved { .. }
        | ActionOutcome::AttackSkipped
        | ActionOutcome::PatrolWaiting
        | ActionOutcome::Stale => {}
    }
}
