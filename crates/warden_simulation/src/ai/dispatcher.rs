//! Action dispatcher, physical tick: выполняет действие последнего вычисленного состояния
//!
//! Decision и action крутятся на разных частотах, поэтому каждое действие заново
//! проверяет свои предусловия. Устаревшее решение: это no-op, а не ошибка.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::acquisition::{can_follow, find_follow_target};
use crate::ai::components::{AIState, AiAgent};
use crate::ai::patrol_router::next_live_waypoint;
use crate::ai::world::{Motion, Perception, TargetWorld};

/// Агент считается дошедшим до waypoint ближе этой дистанции
pub const ARRIVAL_THRESHOLD: f32 = 0.1;

/// Всё, что нужно действию на одном physical tick
pub struct ActionContext<'a, W: ?Sized, P: ?Sized, M: ?Sized, R: ?Sized> {
    /// Время симуляции (секунды)
    pub now: f32,
    pub world: &'a mut W,
    pub perception: &'a P,
    pub body: &'a mut M,
    pub rng: &'a mut R,
}

/// Результат physical tick (для логов, событий и тестов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    Idle,
    /// Follow/Patrol выставили скорость
    Moved { velocity: Vec2 },
    /// Follow: target вышел из радиуса или исчез → primary target сброшен
    TargetLost { target: Entity },
    Attacked { target: Entity, damage: f32 },
    /// Attack: решение устарело (cooldown, дистанция, target без Damageable)
    AttackSkipped,
    /// Patrol: ждём cooldown на точке
    PatrolWaiting,
    WaypointReached { reached: Entity, next: Option<Entity> },
    /// Нет валидной цели для действия
    Stale,
}

pub fn dispatch<W, P, M, R>(agent: &mut AiAgent, ctx: &mut ActionContext<'_, W, P, M, R>) -> ActionOutcome
where
    W: TargetWorld + ?Sized,
    P: Perception + ?Sized,
    M: Motion + ?Sized,
    R: Rng + ?Sized,
{
    match agent.state() {
        AIState::Idle => {
            ctx.body.set_velocity(Vec2::ZERO);
            ActionOutcome::Idle
        }
        AIState::Follow => follow(agent, ctx),
        AIState::Attack => attack(agent, ctx),
        AIState::Patrol => patrol(agent, ctx),
    }
}

/// Прямое преследование: direction = normalize(target - agent)
///
/// Дистанцию проверяем заново, препятствия: нет (однажды увиденный target не забывается,
/// пока в радиусе).
fn follow<W, P, M, R>(agent: &mut AiAgent, ctx: &mut ActionContext<'_, W, P, M, R>) -> ActionOutcome
where
    W: TargetWorld + ?Sized,
    P: Perception + ?Sized,
    M: Motion + ?Sized,
    R: Rng + ?Sized,
{
    let origin = ctx.body.position();

    let Some(target) = agent.follow.primary_target else {
        ctx.body.set_velocity(Vec2::ZERO);
        return ActionOutcome::Stale;
    };

    let in_range = can_follow(&*ctx.world, origin, target, agent.follow.detection_radius);
    let target_position = ctx.world.position_of(target);

    let (true, Some(target_position)) = (in_range, target_position) else {
        agent.follow.primary_target = None;
        ctx.body.set_velocity(Vec2::ZERO);
        return ActionOutcome::TargetLost { target };
    };

    let velocity = (target_position - origin).normalize_or_zero() * agent.move_speed;
    ctx.body.set_velocity(velocity);
    ActionOutcome::Moved { velocity }
}

/// Удар по primary target, если он всё ещё attackable
fn attack<W, P, M, R>(agent: &mut AiAgent, ctx: &mut ActionContext<'_, W, P, M, R>) -> ActionOutcome
where
    W: TargetWorld + ?Sized,
    P: Perception + ?Sized,
    M: Motion + ?Sized,
    R: Rng + ?Sized,
{
    // Стоим на месте во время атаки
    ctx.body.set_velocity(Vec2::ZERO);

    let origin = ctx.body.position();
    let Some(target) = agent.follow.primary_target else {
        return ActionOutcome::Stale;
    };

    if !agent.attack.enabled || !agent.attack.can_attack(origin, target, ctx.now, &*ctx.world) {
        return ActionOutcome::AttackSkipped;
    }

    let damage = agent.attack.attack_damage;
    if !ctx.world.take_damage(target, damage) {
        return ActionOutcome::AttackSkipped;
    }

    agent.attack.last_attack_time = ctx.now;
    ActionOutcome::Attacked { target, damage }
}

/// Движение к waypoint + попутный поиск follow target
fn patrol<W, P, M, R>(agent: &mut AiAgent, ctx: &mut ActionContext<'_, W, P, M, R>) -> ActionOutcome
where
    W: TargetWorld + ?Sized,
    P: Perception + ?Sized,
    M: Motion + ?Sized,
    R: Rng + ?Sized,
{
    let origin = ctx.body.position();

    // Патрульный "замечает" target без отдельного polling loop
    if agent.follow.enabled {
        let spotted = find_follow_target(
            &agent.follow.candidates,
            origin,
            agent.follow.detection_radius,
            &*ctx.world,
            ctx.perception,
        );
        if spotted.is_some() {
            agent.follow.primary_target = spotted;
        }
    }

    let Some(waypoint) = agent.patrol.patrol_target else {
        ctx.body.set_velocity(Vec2::ZERO);
        return ActionOutcome::Stale;
    };

    let Some(waypoint_position) = ctx.world.position_of(waypoint) else {
        ctx.body.set_velocity(Vec2::ZERO);
        return ActionOutcome::Stale;
    };

    if !agent.patrol.is_ready(ctx.now) {
        ctx.body.set_velocity(Vec2::ZERO);
        return ActionOutcome::PatrolWaiting;
    }

    if origin.distance(waypoint_position) < ARRIVAL_THRESHOLD {
        let next = next_live_waypoint(&agent.patrol.points, Some(waypoint), &*ctx.world, ctx.rng);

        agent.patrol.last_patrol_time = ctx.now;
        match next {
            Some(next_waypoint) => agent.patrol.patrol_target = Some(next_waypoint),
            None => agent.disable_patrol("all patrol points are gone"),
        }

        ctx.body.set_velocity(Vec2::ZERO);
        return ActionOutcome::WaypointReached { reached: waypoint, next };
    }

    let velocity = (waypoint_position - origin).normalize_or_zero() * agent.move_speed;
    ctx.body.set_velocity(velocity);
    ActionOutcome::Moved { velocity }
}
