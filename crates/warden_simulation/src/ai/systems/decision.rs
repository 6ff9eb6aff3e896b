//! Decision tick system

use bevy::prelude::*;

use crate::ai::components::AiAgent;
use crate::ai::events::AiStateChanged;
use crate::ai::registry::CandidateRegistry;
use crate::ai::systems::view::TargetsView;
use crate::perception::{Collider, ColliderPerception};
use crate::DeterministicRng;

/// Система: decision tick для всех агентов
///
/// Крутится в Update (раз в кадр), но время берёт с fixed clock: cooldown
/// timestamps ставит physical tick, сравнивать их надо с тем же clock.
/// Агенты без явных кандидатов сначала перечитывают `CandidateRegistry`.
pub fn decide_ai_states(
    time: Res<Time<Fixed>>,
    registry: Res<CandidateRegistry>,
    mut rng: ResMut<DeterministicRng>,
    mut agents: Query<(Entity, &mut AiAgent, &Transform)>,
    targets: TargetsView,
    colliders: Query<(Entity, &'static Transform, &'static Collider)>,
    mut state_changed: EventWriter<AiStateChanged>,
) {
    let now = time.elapsed_secs();

    for (entity, mut agent, transform) in agents.iter_mut() {
        if agent.registry_fallback && agent.follow.candidates != registry.targets() {
            agent.follow.candidates = registry.targets().to_vec();
        }

        let perception = ColliderPerception {
            colliders: &colliders,
            exclude: Some(entity),
        };

        let from = agent.state();
        let to = agent.tick(transform.translation.truncate(), now, &targets, &perception, &mut rng.rng);

        if from != to {
            crate::log(&format!("AI: {:?} {:?} → {:?} (t={:.2})", entity, from, to, now));
            state_changed.write(AiStateChanged {
                agent: entity,
                from,
                to,
            });
        }
    }
}
