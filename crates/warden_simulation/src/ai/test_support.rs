//! Моки внешнего мира для unit тестов AI core (без Bevy App)

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::ai::world::{Motion, Perception, RayHit, TargetLookup, TargetWorld};
use crate::perception::{raycast_colliders, Collider};

#[derive(Debug, Clone)]
struct MockEntity {
    position: Vec2,
    health: Option<f32>,
    collider: Option<Collider>,
}

/// Мир: targets (с health + circle collider), waypoints (без collider), стены
#[derive(Debug, Default)]
pub struct MockWorld {
    entities: BTreeMap<Entity, MockEntity>,
    next_index: u32,
    pub damage_log: Vec<(Entity, f32)>,
}

impl MockWorld {
    fn spawn(&mut self, entry: MockEntity) -> Entity {
        // Индексы не переиспользуются, так что generation не нужен
        self.next_index += 1;
        let entity = Entity::from_raw(self.next_index);
        self.entities.insert(entity, entry);
        entity
    }

    pub fn spawn_target(&mut self, position: Vec2, health: f32) -> Entity {
        self.spawn(MockEntity {
            position,
            health: Some(health),
            collider: Some(Collider::Circle { radius: 0.25 }),
        })
    }

    /// Target без Damageable (например, NPC-союзник)
    pub fn spawn_undamageable(&mut self, position: Vec2) -> Entity {
        self.spawn(MockEntity {
            position,
            health: None,
            collider: Some(Collider::Circle { radius: 0.25 }),
        })
    }

    pub fn spawn_waypoint(&mut self, position: Vec2) -> Entity {
        self.spawn(MockEntity {
            position,
            health: None,
            collider: None,
        })
    }

    pub fn spawn_wall(&mut self, center: Vec2, half_extents: Vec2) -> Entity {
        self.spawn(MockEntity {
            position: center,
            health: None,
            collider: Some(Collider::Rect { half_extents }),
        })
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.entities.remove(&entity);
    }

    pub fn move_to(&mut self, entity: Entity, position: Vec2) {
        if let Some(entry) = self.entities.get_mut(&entity) {
            entry.position = position;
        }
    }

    pub fn health_of(&self, entity: Entity) -> Option<f32> {
        self.entities.get(&entity).and_then(|entry| entry.health)
    }
}

impl TargetLookup for MockWorld {
    fn position_of(&self, entity: Entity) -> Option<Vec2> {
        let entry = self.entities.get(&entity)?;
        match entry.health {
            Some(health) if health <= 0.0 => None,
            _ => Some(entry.position),
        }
    }

    fn is_damageable(&self, entity: Entity) -> bool {
        self.entities
            .get(&entity)
            .and_then(|entry| entry.health)
            .is_some_and(|health| health > 0.0)
    }
}

impl TargetWorld for MockWorld {
    fn take_damage(&mut self, entity: Entity, amount: f32) -> bool {
        let Some(health) = self.entities.get_mut(&entity).and_then(|entry| entry.health.as_mut()) else {
            return false;
        };
        if *health <= 0.0 {
            return false;
        }

        *health -= amount;
        self.damage_log.push((entity, amount));
        true
    }
}

impl MockWorld {
    fn colliders(&self) -> impl Iterator<Item = (Entity, Vec2, Collider)> + '_ {
        self.entities
            .iter()
            .filter_map(|(entity, entry)| entry.collider.map(|collider| (*entity, entry.position, collider)))
    }

    /// Копия colliders для physical tick, где мир уже занят `&mut`
    pub fn perception_snapshot(&self) -> MockPerception {
        MockPerception {
            colliders: self.colliders().collect(),
        }
    }
}

impl Perception for MockWorld {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        raycast_colliders(self.colliders(), origin, direction, max_distance, None)
    }
}

#[derive(Debug, Default)]
pub struct MockPerception {
    colliders: Vec<(Entity, Vec2, Collider)>,
}

impl Perception for MockPerception {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RayHit> {
        raycast_colliders(self.colliders.iter().copied(), origin, direction, max_distance, None)
    }
}

/// Тело агента: позиция задаётся тестом, velocity записывается AI
#[derive(Debug, Default)]
pub struct MockBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub velocity_writes: usize,
}

impl MockBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..default()
        }
    }

    /// Интеграция как в `integrate_velocity`
    pub fn step(&mut self, delta: f32) {
        self.position += self.velocity * delta;
    }
}

impl Motion for MockBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.velocity_writes += 1;
    }
}
