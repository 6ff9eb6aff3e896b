//! AiAgent, один агент: move speed, три модуля и текущее AIState

use bevy::prelude::*;
use rand::Rng;

use super::modules::{AttackModule, FollowModule, PatrolModule};
use crate::ai::acquisition::{can_follow, find_follow_target};
use crate::ai::dispatcher::{dispatch, ActionContext, ActionOutcome};
use crate::ai::patrol_router::next_live_waypoint;
use crate::ai::state_engine::compute_state;
use crate::ai::world::{Motion, Perception, TargetLookup, TargetWorld};
use crate::components::Velocity;
use crate::config::AgentConfig;

/// AI состояния
///
/// Пересчитываются с нуля каждый decision tick, не сохраняются.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AIState {
    /// Ничего не делаем
    Idle,
    /// Преследуем primary target
    Follow,
    /// Бьём primary target
    Attack,
    /// Идём к patrol waypoint
    Patrol,
}

impl Default for AIState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Автономный агент
///
/// Scheduler-agnostic: caller сам дёргает `tick` (decision, раз в кадр) и
/// `fixed_tick` (physical, фиксированная частота). Bevy wiring: в `AIPlugin`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Velocity)]
pub struct AiAgent {
    pub move_speed: f32,
    pub follow: FollowModule,
    pub patrol: PatrolModule,
    pub attack: AttackModule,
    /// Заспавнен без кандидатов → читает общий `CandidateRegistry`
    pub registry_fallback: bool,
    state: AIState,
}

impl Default for AiAgent {
    fn default() -> Self {
        Self::new(&AgentConfig::default(), Vec::new())
    }
}

impl AiAgent {
    /// Waypoints уже заспавнены caller'ом; кандидаты берутся из `config.candidates`
    pub fn new(config: &AgentConfig, patrol_points: Vec<Entity>) -> Self {
        Self {
            move_speed: config.move_speed,
            follow: FollowModule::from_config(config, config.candidates.clone()),
            patrol: PatrolModule::from_config(config, patrol_points),
            attack: AttackModule::from_config(config),
            registry_fallback: config.candidates.is_empty(),
            state: AIState::Idle,
        }
    }

    pub fn state(&self) -> AIState {
        self.state
    }

    /// Первый patrol target при спавне
    pub fn init_patrol<L, R>(&mut self, world: &L, rng: &mut R)
    where
        L: TargetLookup + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.patrol.enabled {
            self.patrol.patrol_target = None;
            return;
        }

        self.patrol.patrol_target = next_live_waypoint(&self.patrol.points, None, world, rng);
        if self.patrol.patrol_target.is_none() {
            self.disable_patrol("no patrol points set");
        }
    }

    /// Configuration gap: patrol выключается, симуляция продолжается
    pub fn disable_patrol(&mut self, reason: &str) {
        self.patrol.enabled = false;
        self.patrol.patrol_target = None;
        crate::log_warning(&format!("AI: patrol disabled ({})", reason));
    }

    /// Decision tick
    ///
    /// 1. Waypoint исчез → перемаршрутизация среди живых точек
    /// 2. Target вышел из detection radius → сброс
    /// 3. Follow включён и target невалиден → target acquisition
    /// 4. `compute_state`
    pub fn tick<L, P, R>(&mut self, origin: Vec2, now: f32, world: &L, perception: &P, rng: &mut R) -> AIState
    where
        L: TargetLookup + ?Sized,
        P: Perception + ?Sized,
        R: Rng + ?Sized,
    {
        if self.patrol.enabled && self.patrol.target_position(world).is_none() {
            let current = self.patrol.patrol_target;
            match next_live_waypoint(&self.patrol.points, current, world, rng) {
                Some(waypoint) => self.patrol.patrol_target = Some(waypoint),
                None => self.disable_patrol("all patrol points are gone"),
            }
        }

        if let Some(target) = self.follow.validate_target(world) {
            if !can_follow(world, origin, target, self.follow.detection_radius) {
                self.follow.primary_target = None;
            }
        }

        if self.follow.enabled && self.follow.primary_target.is_none() {
            self.follow.primary_target = find_follow_target(
                &self.follow.candidates,
                origin,
                self.follow.detection_radius,
                world,
                perception,
            );
        }

        self.state = compute_state(&mut self.follow, &self.attack, &self.patrol, origin, now, world);
        self.state
    }

    /// Physical tick: действие для последнего вычисленного состояния
    pub fn fixed_tick<W, P, M, R>(
        &mut self,
        now: f32,
        world: &mut W,
        perception: &P,
        body: &mut M,
        rng: &mut R,
    ) -> ActionOutcome
    where
        W: TargetWorld + ?Sized,
        P: Perception + ?Sized,
        M: Motion + ?Sized,
        R: Rng + ?Sized,
    {
        let mut ctx = ActionContext {
            now,
            world,
            perception,
            body,
            rng,
        };
        dispatch(self, &mut ctx)
    }
}
