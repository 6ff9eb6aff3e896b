//! Damage events и death system

use bevy::prelude::*;

use crate::components::{Damageable, Health};

/// Событие: урон нанесён
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub target_died: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Система: despawn мёртвых (Health <= 0)
///
/// Крутится последней в FixedUpdate: liveness check на следующем tick'е видит пустой handle.
pub fn despawn_dead(mut commands: Commands, healths: Query<(Entity, &Health)>) {
    for (entity, health) in healths.iter() {
        if health.is_alive() {
            continue;
        }

        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
            crate::log(&format!("Combat: despawned dead entity {:?}", entity));
        }
    }
}
