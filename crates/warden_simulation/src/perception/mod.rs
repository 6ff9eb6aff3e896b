//! Headless perception: коллайдеры + raycast для line-of-sight
//!
//! Физика (rigid bodies) вне scope: здесь только геометрия лучей, достаточная
//! для LOS проверок AI:
//! - попали в target → видим
//! - попали во что-то другое (стена, другой актор) → заблокировано
//!
//! 2D плоскость: Transform.translation.xy, z игнорируется.

use bevy::prelude::*;

use crate::ai::world::{Perception, RayHit};

/// Форма коллайдера (центр = Transform.translation.xy)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum Collider {
    Circle { radius: f32 },
    /// Axis-aligned прямоугольник (стены)
    Rect { half_extents: Vec2 },
}

impl Collider {
    /// Дистанция вдоль луча до входа в коллайдер
    ///
    /// `direction` должен быть нормализован. Origin внутри коллайдера → `Some(0.0)`.
    pub fn ray_distance(&self, center: Vec2, origin: Vec2, direction: Vec2) -> Option<f32> {
        match *self {
            Collider::Circle { radius } => ray_circle(center, radius, origin, direction),
            Collider::Rect { half_extents } => ray_aabb(center - half_extents, center + half_extents, origin, direction),
        }
    }
}

fn ray_circle(center: Vec2, radius: f32, origin: Vec2, direction: Vec2) -> Option<f32> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;

    // Снаружи и смотрим от круга
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()).max(0.0))
}

/// Slab method
fn ray_aabb(min: Vec2, max: Vec2, origin: Vec2, direction: Vec2) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..2 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < f32::EPSILON {
            // Параллельно slab'у: должны быть внутри
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (min[axis] - o) * inv;
        let mut t2 = (max[axis] - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Ближайшее попадание луча среди коллайдеров
///
/// `exclude`: сам стреляющий агент (луч стартует внутри его коллайдера).
/// При равной дистанции побеждает коллайдер, встреченный первым.
pub fn raycast_colliders<I>(
    colliders: I,
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
    exclude: Option<Entity>,
) -> Option<RayHit>
where
    I: IntoIterator<Item = (Entity, Vec2, Collider)>,
{
    let direction = direction.try_normalize()?;
    let mut nearest: Option<RayHit> = None;

    for (entity, center, collider) in colliders {
        if Some(entity) == exclude {
            continue;
        }

        let Some(distance) = collider.ray_distance(center, origin, direction) else {
            continue;
        };

        if distance > max_distance {
            continue;
        }

        if nearest.is_none_or(|best| distance < best.distance) {
            nearest = Some(RayHit { entity, distance });
        }
    }

    nearest
}

/// Perception адаптер поверх ECS коллайдеров
pub struct ColliderPerception<'a, 'w, 's> {
    pub colliders: &'a Query<'w, 's, (Entity, &'static Transform, &'static Collider)>,
    /// Entity агента, от которого идёт луч
    pub exclude: Option<Entity>,
}

impl Perception for ColliderPerception<'_, '_, '_> {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        let colliders = self
            .colliders
            .iter()
            .map(|(entity, transform, collider)| (entity, transform.translation.truncate(), *collider));

        raycast_colliders(colliders, origin, direction, max_distance, self.exclude)
    }
}
