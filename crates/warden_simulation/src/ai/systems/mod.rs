//! AI systems: Bevy wiring для AI core
//!
//! - decision: decision tick (Update, раз в кадр)
//! - action: physical tick (FixedUpdate)
//! - view: адаптеры ECS Query → collaborator trait'ы AI core

pub mod action;
pub mod decision;
pub mod view;

// Re-export all systems
pub use action::execute_ai_actions;
pub use decision::decide_ai_states;
pub use view::{BodyMotion, CombatView, CombatWorld, TargetsView};
