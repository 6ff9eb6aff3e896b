//! Configuration: параметры агента и сценарии симуляции
//!
//! AgentConfig: опции одного агента (модули + тюнинг).
//! ScenarioConfig: целый headless сценарий (агенты, targets, стены), грузится из TOML.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки/валидации конфигурации
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing TOML config
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Отрицательное или не конечное число
    #[error("invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Configuration gap: не фатально, логируется warning'ом при спавне
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Patrol включён, а точек нет → patrol будет выключен
    NoPatrolPoints,
    /// Attack без Follow никогда не получит target
    AttackWithoutFollow,
    /// Кандидаты не заданы → агент читает общий CandidateRegistry
    RegistryFallback,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::NoPatrolPoints => write!(f, "patrol enabled but no patrol points set"),
            ConfigWarning::AttackWithoutFollow => {
                write!(f, "attack enabled without follow: targets are never acquired")
            }
            ConfigWarning::RegistryFallback => {
                write!(f, "no follow candidates supplied, falling back to the candidate registry")
            }
        }
    }
}

/// Опции одного агента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub follow_enabled: bool,
    pub attack_enabled: bool,
    pub patrol_enabled: bool,
    pub move_speed: f32,
    pub detection_radius: f32,
    pub attack_range: f32,
    /// Секунды между атаками
    pub attack_delay: f32,
    pub attack_damage: f32,
    /// Секунды ожидания на waypoint
    pub patrol_delay: f32,
    /// World позиции waypoints (спавнятся вместе с агентом)
    pub patrol_points: Vec<[f32; 2]>,
    /// Явный список follow кандидатов (порядок = приоритет)
    ///
    /// Только программно: entity handles не сериализуются.
    #[serde(skip)]
    pub candidates: Vec<Entity>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            follow_enabled: true,
            attack_enabled: false,
            patrol_enabled: false,
            move_speed: 2.0,
            detection_radius: 5.0,
            attack_range: 0.5,
            attack_delay: 1.0,
            attack_damage: 10.0,
            patrol_delay: 2.0,
            patrol_points: Vec::new(),
            candidates: Vec::new(),
        }
    }
}

impl AgentConfig {
    /// Проверка чисел + список configuration gaps
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        let numbers = [
            ("move_speed", self.move_speed),
            ("detection_radius", self.detection_radius),
            ("attack_range", self.attack_range),
            ("attack_delay", self.attack_delay),
            ("attack_damage", self.attack_damage),
            ("patrol_delay", self.patrol_delay),
        ];
        for (field, value) in numbers {
            check_non_negative(field, value)?;
        }

        for point in &self.patrol_points {
            for value in point {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidValue {
                        field: "patrol_points",
                        value: *value,
                    });
                }
            }
        }

        let mut warnings = Vec::new();
        if self.patrol_enabled && self.patrol_points.is_empty() {
            warnings.push(ConfigWarning::NoPatrolPoints);
        }
        if self.attack_enabled && !self.follow_enabled {
            warnings.push(ConfigWarning::AttackWithoutFollow);
        }
        if self.candidates.is_empty() {
            warnings.push(ConfigWarning::RegistryFallback);
        }

        Ok(warnings)
    }

    pub fn patrol_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.patrol_points.iter().map(|&[x, y]| Vec2::new(x, y))
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

/// Агент в сценарии
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpawn {
    pub position: [f32; 2],
    #[serde(default)]
    pub config: AgentConfig,
}

/// Followable target в сценарии (Health + circle collider)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSpawn {
    pub position: [f32; 2],
    pub health: f32,
    pub radius: f32,
    /// Постоянная скорость (target убегает/проходит мимо)
    pub velocity: [f32; 2],
}

impl Default for TargetSpawn {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            health: 100.0,
            radius: 0.25,
            velocity: [0.0, 0.0],
        }
    }
}

/// Стена (axis-aligned, блокирует line-of-sight)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpawn {
    pub position: [f32; 2],
    pub half_extents: [f32; 2],
}

/// Headless сценарий
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub seed: u64,
    /// Сколько кадров (decision ticks) прогнать
    pub frames: u32,
    /// Длительность кадра в миллисекундах
    pub frame_ms: u64,
    /// Частота physical tick (Hz)
    pub tick_hz: f64,
    pub agents: Vec<AgentSpawn>,
    pub targets: Vec<TargetSpawn>,
    pub obstacles: Vec<ObstacleSpawn>,
}

impl Default for ScenarioConfig {
    /// Демо: патрульный с атакой, follower и убегающий target за стеной
    fn default() -> Self {
        Self {
            seed: 42,
            frames: 600,
            frame_ms: 16,
            tick_hz: 60.0,
            agents: vec![
                AgentSpawn {
                    position: [0.0, 0.0],
                    config: AgentConfig {
                        attack_enabled: true,
                        patrol_enabled: true,
                        patrol_delay: 1.0,
                        patrol_points: vec![[-4.0, -4.0], [4.0, -4.0], [4.0, 4.0], [-4.0, 4.0]],
                        ..AgentConfig::default()
                    },
                },
                AgentSpawn {
                    position: [-6.0, 0.0],
                    config: AgentConfig {
                        move_speed: 1.5,
                        ..AgentConfig::default()
                    },
                },
            ],
            targets: vec![
                TargetSpawn {
                    position: [3.0, 1.0],
                    health: 30.0,
                    ..TargetSpawn::default()
                },
                TargetSpawn {
                    position: [-9.0, 3.0],
                    velocity: [0.5, 0.0],
                    ..TargetSpawn::default()
                },
            ],
            obstacles: vec![ObstacleSpawn {
                position: [-2.0, 2.0],
                half_extents: [0.2, 1.5],
            }],
        }
    }
}

impl ScenarioConfig {
    /// Loads scenario from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses scenario from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Числа сценария + каждого агента (warnings агентов логируются при спавне)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "tick_hz",
                value: self.tick_hz as f32,
            });
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "frame_ms",
                value: 0.0,
            });
        }

        for agent in &self.agents {
            agent.config.validate()?;
        }
        for target in &self.targets {
            check_non_negative("targets.health", target.health)?;
            check_non_negative("targets.radius", target.radius)?;
        }
        for obstacle in &self.obstacles {
            for value in obstacle.half_extents {
                check_non_negative("obstacles.half_extents", value)?;
            }
        }

        Ok(())
    }
}
