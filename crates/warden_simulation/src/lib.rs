//! Warden Simulation Core
//!
//! ECS-симуляция автономных NPC на Bevy 0.16 (headless)
//!
//! - ai: агенты (Follow / Patrol / Attack), state engine, action dispatcher
//! - combat: Health, урон, смерть
//! - perception: коллайдеры + raycast для line-of-sight
//! - config / scenario: TOML конфиги и headless прогоны

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod perception;
pub mod scenario;

// Re-export базовых типов для удобства
pub use ai::{spawn_agent, AIPlugin, AIState, AiAgent, AiStateChanged, CandidateRegistry};
pub use combat::{CombatPlugin, DamageDealt, EntityDied};
pub use components::*;
pub use config::{AgentConfig, ConfigError, ConfigWarning, ScenarioConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel};
pub use perception::Collider;

/// Seed по умолчанию (если caller не вставил свой DeterministicRng)
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physical tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG: seed из create_headless_app не перетираем
            .init_resource::<DeterministicRng>()
            // Подсистемы
            .add_plugins((CombatPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
