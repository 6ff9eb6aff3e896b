//! AI Events: наблюдаемые переходы состояний

use bevy::prelude::*;

use crate::ai::components::AIState;

/// Decision tick изменил состояние агента
///
/// Пишется только при реальной смене (`from != to`).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiStateChanged {
    pub agent: Entity,
    pub from: AIState,
    pub to: AIState,
}
