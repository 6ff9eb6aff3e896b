//! Target acquisition: кого из кандидатов агент сейчас видит
//!
//! Выбор first-match по порядку списка, НЕ nearest-match. Так вела себя игра
//! изначально, и на этом держится совместимость сценариев.
//! TODO: перейти на nearest-match, когда сценарии перестанут зависеть от порядка candidates.

use bevy::prelude::*;

use crate::ai::world::{Perception, TargetLookup};

/// Дешёвая проверка: target жив и в радиусе обнаружения
pub fn can_follow<L: TargetLookup + ?Sized>(world: &L, origin: Vec2, target: Entity, detection_radius: f32) -> bool {
    world
        .position_of(target)
        .is_some_and(|position| origin.distance(position) <= detection_radius)
}

/// Дистанция + line-of-sight
///
/// Луч от origin к target длиной `detection_radius`: target видим, только если
/// первое попадание: он сам. Любое другое попадание блокирует.
pub fn can_follow_sighted<L, P>(
    world: &L,
    perception: &P,
    origin: Vec2,
    target: Entity,
    detection_radius: f32,
) -> bool
where
    L: TargetLookup + ?Sized,
    P: Perception + ?Sized,
{
    // Сначала дистанция: raycast дороже
    if !can_follow(world, origin, target, detection_radius) {
        return false;
    }

    let Some(target_position) = world.position_of(target) else {
        return false;
    };

    let to_target = target_position - origin;
    if to_target.length_squared() <= f32::EPSILON {
        // Стоит вплотную: нулевой отрезок ничем не перекрыт
        return true;
    }

    perception
        .raycast(origin, to_target, detection_radius)
        .is_some_and(|hit| hit.entity == target)
}

/// Первый кандидат (по порядку списка), который в радиусе и в прямой видимости
pub fn find_follow_target<L, P>(
    candidates: &[Entity],
    origin: Vec2,
    detection_radius: f32,
    world: &L,
    perception: &P,
) -> Option<Entity>
where
    L: TargetLookup + ?Sized,
    P: Perception + ?Sized,
{
    candidates
        .iter()
        .copied()
        .find(|&candidate| can_follow_sighted(world, perception, origin, candidate, detection_radius))
}
