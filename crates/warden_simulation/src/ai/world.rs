//! Внешние коллабораторы AI core
//!
//! AI не знает про ECS Query, физику и здоровье напрямую: только эти trait'ы.
//! Bevy адаптеры: `ai::systems::view`, `perception::ColliderPerception`.
//! В тестах, моки из `ai::test_support`.

use bevy::prelude::*;

/// Ближайшее попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    /// Дистанция от origin до точки попадания
    pub distance: f32,
}

/// Read-only доступ к внешним entity (targets, waypoints)
///
/// `position_of`, это и есть liveness check: `None` для despawned/мертвых/неизвестных.
pub trait TargetLookup {
    fn position_of(&self, entity: Entity) -> Option<Vec2>;

    /// Есть ли у entity живой Damageable
    fn is_damageable(&self, entity: Entity) -> bool;
}

/// Lookup + право наносить урон
pub trait TargetWorld: TargetLookup {
    /// Возвращает `true`, если урон действительно применён
    fn take_damage(&mut self, entity: Entity, amount: f32) -> bool;
}

/// Perception primitive (line-of-sight)
pub trait Perception {
    /// `direction` не обязан быть нормализован; нулевое направление → `None`
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit>;
}

/// Motion executor самого агента
pub trait Motion {
    fn position(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
}
