//! Маркеры мира: patrol waypoints и followable targets

use bevy::prelude::*;

/// Фиксированная точка патруля (позиция = Transform)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Waypoint;

/// Тег потенциальной follow цели
///
/// `track_followables` держит `CandidateRegistry` в порядке добавления тега.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Followable;
