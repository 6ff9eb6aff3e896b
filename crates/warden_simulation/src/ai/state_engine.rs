//! State engine: AIState заново на каждом decision tick
//!
//! Это не FSM с рёбрами переходов: состояние выводится из live предикатов.
//! Приоритет (strict short-circuit): Attack > Follow > Patrol > Idle.

use bevy::prelude::*;

use crate::ai::components::{AIState, AttackModule, FollowModule, PatrolModule};
use crate::ai::world::TargetLookup;

/// Вычисляет состояние агента
///
/// Единственный side effect: сброс невалидного primary target.
/// Если target валиден, но Attack не подходит и Follow выключен: проваливаемся в Patrol.
pub fn compute_state<L: TargetLookup + ?Sized>(
    follow: &mut FollowModule,
    attack: &AttackModule,
    patrol: &PatrolModule,
    origin: Vec2,
    now: f32,
    world: &L,
) -> AIState {
    if let Some(target) = follow.validate_target(world) {
        if attack.enabled && attack.can_attack(origin, target, now, world) {
            return AIState::Attack;
        }
        if follow.enabled {
            return AIState::Follow;
        }
    }

    if patrol.enabled && patrol.target_position(world).is_some() {
        return AIState::Patrol;
    }

    AIState::Idle
}
