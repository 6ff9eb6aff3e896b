//! Patrol router: следующий waypoint без немедленного повтора

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::ai::world::TargetLookup;

/// Случайный waypoint из `points`, отличный от `current`
///
/// - пустой список → `None` (caller выключает patrol с warning)
/// - одна точка → она же, без rejection loop (иначе бесконечный цикл)
/// - все точки совпадают с `current` (дубликаты) → `current`
///
/// Равномерно среди точек ≠ `current`: то же распределение, что у reject-and-retry.
pub fn next_waypoint<R: Rng + ?Sized>(points: &[Entity], current: Option<Entity>, rng: &mut R) -> Option<Entity> {
    match points {
        [] => None,
        [only] => Some(*only),
        _ => {
            let others: Vec<Entity> = points
                .iter()
                .copied()
                .filter(|&point| Some(point) != current)
                .collect();

            others.choose(rng).copied().or(current)
        }
    }
}

/// То же, но только среди ещё существующих waypoints
pub fn next_live_waypoint<L, R>(points: &[Entity], current: Option<Entity>, world: &L, rng: &mut R) -> Option<Entity>
where
    L: TargetLookup + ?Sized,
    R: Rng + ?Sized,
{
    let live: Vec<Entity> = points
        .iter()
        .copied()
        .filter(|&point| world.position_of(point).is_some())
        .collect();

    next_waypoint(&live, current, rng)
}
