//! AI decision-making module
//!
//! Автономный NPC: три модуля (Follow, Patrol, Attack), state engine и action dispatcher.
//! Core не знает про Bevy schedules: `AiAgent::tick` / `AiAgent::fixed_tick` + collaborator
//! trait'ы из `world`. Bevy wiring: `AIPlugin` и `systems`.

use bevy::prelude::*;

pub mod acquisition;
pub mod components;
pub mod cooldown;
pub mod dispatcher;
pub mod events;
pub mod patrol_router;
pub mod registry;
pub mod spawn;
pub mod state_engine;
pub mod systems;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export основных типов
pub use components::{AIState, AiAgent, AttackModule, FollowModule, PatrolModule};
pub use dispatcher::{ActionOutcome, ARRIVAL_THRESHOLD};
pub use events::AiStateChanged;
pub use registry::{track_followables, CandidateRegistry};
pub use spawn::{spawn_agent, WorldLookup, AGENT_RADIUS};
pub use systems::{decide_ai_states, execute_ai_actions};
pub use world::{Motion, Perception, RayHit, TargetLookup, TargetWorld};

use crate::combat::{despawn_dead, CombatPlugin};
use crate::components::integrate_velocity;
use crate::DeterministicRng;

/// AI Plugin
///
/// Две частоты:
/// - Update (раз в кадр): track_followables → decide_ai_states
/// - FixedUpdate (60Hz): execute_ai_actions → integrate_velocity → despawn_dead
///
/// Bevy гоняет FixedUpdate раньше Update внутри кадра, поэтому physical tick всегда
/// исполняет состояние, посчитанное завершённым decision tick'ом.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CombatPlugin>() {
            app.add_plugins(CombatPlugin);
        }

        app.init_resource::<CandidateRegistry>()
            .init_resource::<DeterministicRng>()
            .add_event::<AiStateChanged>()
            .register_type::<AiAgent>();

        app.add_systems(Update, (track_followables, decide_ai_states).chain());

        app.add_systems(
            FixedUpdate,
            (execute_ai_actions, integrate_velocity, despawn_dead).chain(), // Последовательное выполнение для детерминизма
        );
    }
}
