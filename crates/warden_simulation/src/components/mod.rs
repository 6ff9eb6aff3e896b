//! ECS Components для entity симуляции
//!
//! Организация по доменам:
//! - actor: здоровье (Health) и Damageable capability
//! - movement: скорость агента и её интеграция в Transform
//! - world: маркеры мира (Waypoint, Followable)

pub mod actor;
pub mod movement;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use world::*;
