//! Базовые компоненты акторов: Health + Damageable

use bevy::prelude::*;

/// Capability "можно нанести урон"
///
/// Побочные эффекты (смерть, despawn): снаружи AI core.
pub trait Damageable {
    fn take_damage(&mut self, amount: f32);

    fn is_alive(&self) -> bool;
}

/// Здоровье актора (float hit points)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: f32) {
        // Отрицательный урон не лечит
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}
