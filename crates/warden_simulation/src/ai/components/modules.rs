//! AI модули: Follow, Patrol, Attack
//!
//! Каждый модуль включается независимо. Runtime поля (target, timestamps) имеют смысл
//! только при `enabled == true`.

use bevy::prelude::*;

use crate::ai::cooldown;
use crate::ai::world::TargetLookup;
use crate::config::AgentConfig;

/// Follow: выбор и преследование primary target
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct FollowModule {
    pub enabled: bool,
    /// Слабая ссылка: AI не владеет target'ом, перед чтением всегда liveness check
    pub primary_target: Option<Entity>,
    /// Порядок важен: acquisition берёт первого подходящего, не ближайшего
    pub candidates: Vec<Entity>,
    pub detection_radius: f32,
}

impl Default for FollowModule {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default(), Vec::new())
    }
}

impl FollowModule {
    pub fn from_config(config: &AgentConfig, candidates: Vec<Entity>) -> Self {
        Self {
            enabled: config.follow_enabled,
            primary_target: None,
            candidates,
            detection_radius: config.detection_radius,
        }
    }

    /// Liveness check primary target; мёртвый/despawned target сбрасывается в `None`
    pub fn validate_target<L: TargetLookup + ?Sized>(&mut self, world: &L) -> Option<Entity> {
        let target = self.primary_target?;

        if world.position_of(target).is_some() {
            Some(target)
        } else {
            self.primary_target = None;
            None
        }
    }
}

/// Patrol: движение между фиксированными waypoints
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct PatrolModule {
    pub enabled: bool,
    pub patrol_target: Option<Entity>,
    /// Фиксируется при спавне
    pub points: Vec<Entity>,
    /// Ожидание на каждой точке (секунды)
    pub patrol_delay: f32,
    pub last_patrol_time: f32,
}

impl Default for PatrolModule {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default(), Vec::new())
    }
}

impl PatrolModule {
    pub fn from_config(config: &AgentConfig, points: Vec<Entity>) -> Self {
        Self {
            enabled: config.patrol_enabled,
            patrol_target: None,
            points,
            patrol_delay: config.patrol_delay,
            last_patrol_time: 0.0,
        }
    }

    pub fn is_ready(&self, now: f32) -> bool {
        cooldown::ready(self.last_patrol_time, self.patrol_delay, now)
    }

    /// Позиция текущего waypoint, если он ещё существует
    pub fn target_position<L: TargetLookup + ?Sized>(&self, world: &L) -> Option<Vec2> {
        self.patrol_target.and_then(|waypoint| world.position_of(waypoint))
    }
}

/// Attack: урон primary target'у с cooldown
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct AttackModule {
    pub enabled: bool,
    pub attack_range: f32,
    /// Задержка между атаками (секунды)
    pub attack_delay: f32,
    pub last_attack_time: f32,
    pub attack_damage: f32,
}

impl Default for AttackModule {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}

impl AttackModule {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            enabled: config.attack_enabled,
            attack_range: config.attack_range,
            attack_delay: config.attack_delay,
            last_attack_time: 0.0,
            attack_damage: config.attack_damage,
        }
    }

    pub fn is_ready(&self, now: f32) -> bool {
        cooldown::ready(self.last_attack_time, self.attack_delay, now)
    }

    /// Можно ли ударить `target` прямо сейчас: cooldown, дистанция, Damageable
    ///
    /// Вызывается и на decision tick, и повторно на physical tick: между ними
    /// target мог уйти или cooldown ещё не истёк.
    pub fn can_attack<L: TargetLookup + ?Sized>(
        &self,
        origin: Vec2,
        target: Entity,
        now: f32,
        world: &L,
    ) -> bool {
        if !self.is_ready(now) {
            return false;
        }

        let Some(target_position) = world.position_of(target) else {
            return false;
        };

        if origin.distance(target_position) > self.attack_range {
            return false;
        }

        world.is_damageable(target)
    }
}
