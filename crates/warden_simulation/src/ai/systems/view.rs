//! ECS адаптеры для collaborator trait'ов
//!
//! Позиция entity = Transform.translation.xy. Entity с Health <= 0 считается
//! уничтоженным ещё до того, как `despawn_dead` его уберёт.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::ai::world::{Motion, TargetLookup, TargetWorld};
use crate::combat::DamageDealt;
use crate::components::{Damageable, Health, Velocity};

/// Read-only мир для decision tick
#[derive(SystemParam)]
pub struct TargetsView<'w, 's> {
    pub transforms: Query<'w, 's, &'static Transform>,
    pub healths: Query<'w, 's, &'static Health>,
}

impl TargetLookup for TargetsView<'_, '_> {
    fn position_of(&self, entity: Entity) -> Option<Vec2> {
        let transform = self.transforms.get(entity).ok()?;
        match self.healths.get(entity) {
            Ok(health) if !health.is_alive() => None,
            _ => Some(transform.translation.truncate()),
        }
    }

    fn is_damageable(&self, entity: Entity) -> bool {
        self.healths.get(entity).is_ok_and(|health| health.is_alive())
    }
}

/// Мир для physical tick: позиции + право менять Health
#[derive(SystemParam)]
pub struct CombatWorld<'w, 's> {
    pub transforms: Query<'w, 's, &'static Transform>,
    pub healths: Query<'w, 's, &'static mut Health>,
}

impl CombatWorld<'_, '_> {
    fn position_of(&self, entity: Entity) -> Option<Vec2> {
        let transform = self.transforms.get(entity).ok()?;
        match self.healths.get(entity) {
            Ok(health) if !health.is_alive() => None,
            _ => Some(transform.translation.truncate()),
        }
    }
}

/// CombatWorld глазами одного атакующего: попадания копятся в `hits`
pub struct CombatView<'a, 'w, 's> {
    pub world: &'a mut CombatWorld<'w, 's>,
    pub attacker: Entity,
    pub hits: &'a mut Vec<DamageDealt>,
}

impl TargetLookup for CombatView<'_, '_, '_> {
    fn position_of(&self, entity: Entity) -> Option<Vec2> {
        self.world.position_of(entity)
    }

    fn is_damageable(&self, entity: Entity) -> bool {
        self.world.healths.get(entity).is_ok_and(|health| health.is_alive())
    }
}

impl TargetWorld for CombatView<'_, '_, '_> {
    fn take_damage(&mut self, entity: Entity, amount: f32) -> bool {
        let Ok(mut health) = self.world.healths.get_mut(entity) else {
            return false;
        };
        if !health.is_alive() {
            return false;
        }

        health.take_damage(amount);
        self.hits.push(DamageDealt {
            attacker: self.attacker,
            target: entity,
            damage: amount,
            target_died: !health.is_alive(),
        });
        true
    }
}

/// Motion executor поверх Velocity компонента агента
pub struct BodyMotion<'a> {
    pub position: Vec2,
    pub velocity: Mut<'a, Velocity>,
}

impl Motion for BodyMotion<'_> {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        // Иначе Changed<Velocity> спамит каждый tick
        self.velocity.set_if_neq(Velocity(velocity));
    }
}
