//! Movement: скорость агента и headless интеграция
//!
//! AI пишет только Velocity; позицию двигает `integrate_velocity` на physical tick.
//! Rigid-body физики нет: translation += velocity * dt (x, y), z не трогаем.

use bevy::prelude::*;

/// Желаемая скорость агента (world units / sec)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

/// Система: Transform += Velocity * fixed dt
pub fn integrate_velocity(time: Res<Time<Fixed>>, mut bodies: Query<(&Velocity, &mut Transform)>) {
    let delta = time.delta_secs();

    for (velocity, mut transform) in bodies.iter_mut() {
        if velocity.0 == Vec2::ZERO {
            continue;
        }

        transform.translation += (velocity.0 * delta).extend(0.0);
    }
}
