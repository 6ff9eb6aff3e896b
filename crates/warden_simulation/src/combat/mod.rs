//! Combat module: урон от AI атак, смерть и уборка трупов
//!
//! ECS ответственность:
//! - Game state: Health
//! - Events: DamageDealt, EntityDied
//! - Уборка: `despawn_dead` в конце physical tick
//!
//! Урон наносит `execute_ai_actions` (через `TargetWorld::take_damage`),
//! здесь только регистрация событий и смерть.

use bevy::prelude::*;

pub mod damage;

// Re-export основных типов
pub use damage::{despawn_dead, DamageDealt, EntityDied};

/// Combat Plugin
///
/// Регистрирует события. `despawn_dead` ставит `AIPlugin` (он знает порядок
/// относительно `execute_ai_actions`).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageDealt>().add_event::<EntityDied>();
    }
}
