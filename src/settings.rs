//! Simulation settings, arena presets and validation
//!
//! Settings are plain serde data. They are validated once before a simulation
//! starts; any inconsistency is fatal to starting and never re-checked per tick.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{BoundaryPolicy, SpawnLayout, VelocityRange, WorldBounds};

/// Configuration problems detected before the simulation starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("{0} must be positive and finite, got {1}")]
    NotPositive(&'static str, f32),
    #[error("{0} must be finite and non-negative, got {1}")]
    Negative(&'static str, f32),
    #[error("{0} must be finite, got {1}")]
    NotFinite(&'static str, f32),
    #[error("obstacle velocity range is inverted: min {min} > max {max}")]
    InvertedVelocityRange { min: f32, max: f32 },
    #[error("spawn layout needs at least one column")]
    ZeroColumns,
    #[error("obstacle {index} would spawn at ({x}, {y}) outside the world")]
    SpawnOutOfBounds { index: u32, x: f32, y: f32 },
    #[error("player would start at ({x}, {y}) outside the world")]
    PlayerOutOfBounds { x: f32, y: f32 },
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The three arena variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArenaPreset {
    /// Screen-sized wrapping arena, no obstacles
    ScreenWrap,
    /// Large bounded arena full of bouncing obstacles
    #[default]
    Asteroids,
    /// Large wrapping arena with the obstacle field
    Hybrid,
}

impl ArenaPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaPreset::ScreenWrap => "ScreenWrap",
            ArenaPreset::Asteroids => "Asteroids",
            ArenaPreset::Hybrid => "Hybrid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "screenwrap" | "wrap" => Some(ArenaPreset::ScreenWrap),
            "asteroids" | "bounded" => Some(ArenaPreset::Asteroids),
            "hybrid" => Some(ArenaPreset::Hybrid),
            _ => None,
        }
    }
}

/// Everything needed to start a simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub policy: BoundaryPolicy,
    pub world: WorldBounds,

    // === Controlled body ===
    pub player_start: Vec2,
    pub player_radius: f32,
    /// Velocity added per tick of thrust
    pub thrust: f32,
    /// Wall restitution under `BoundedElastic`
    pub player_restitution: f32,

    // === Input ===
    /// Keyboard rotation per tick (radians)
    pub rotate_step: f32,
    pub stick_deadzone: f32,

    // === Obstacles ===
    pub obstacle_count: u32,
    pub layout: SpawnLayout,
    pub obstacle_radius: f32,
    pub obstacle_velocity: VelocityRange,

    // === Physics ===
    /// Run seed for reproducibility
    pub seed: u64,
    /// Resolve circle contacts between bodies
    pub collisions: bool,
    /// Speed limit enforced by the physics backend
    pub max_speed: Option<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(ArenaPreset::default())
    }
}

impl Settings {
    /// Settings for one of the arena variants
    pub fn from_preset(preset: ArenaPreset) -> Self {
        let big = WorldBounds::new(ARENA_SIZE, ARENA_SIZE);
        let mut settings = Self {
            policy: BoundaryPolicy::BoundedElastic,
            world: big,
            player_start: big.center(),
            player_radius: PLAYER_RADIUS,
            thrust: PLAYER_THRUST,
            player_restitution: 1.0,
            rotate_step: ROTATE_STEP,
            stick_deadzone: 0.0,
            obstacle_count: 100,
            layout: SpawnLayout {
                origin: big.center(),
                step: Vec2::new(50.0, 50.0),
                columns: 10,
            },
            obstacle_radius: OBSTACLE_RADIUS,
            obstacle_velocity: VelocityRange {
                min: OBSTACLE_VELOCITY_MIN,
                max: OBSTACLE_VELOCITY_MAX,
            },
            seed: 0,
            collisions: true,
            max_speed: None,
        };

        match preset {
            ArenaPreset::Asteroids => {}
            ArenaPreset::Hybrid => settings.policy = BoundaryPolicy::Wrap,
            ArenaPreset::ScreenWrap => {
                let screen = WorldBounds::new(SCREEN_WIDTH, SCREEN_HEIGHT);
                settings.policy = BoundaryPolicy::Wrap;
                settings.world = screen;
                settings.player_start = screen.center();
                settings.obstacle_count = 0;
                settings.layout.origin = screen.center();
            }
        }

        settings
    }

    /// Load and validate settings from a JSON file. Missing fields take the
    /// default (Asteroids) values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check that the configuration can start a simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let WorldBounds { width, height } = self.world;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidBounds { width, height });
        }

        positive("player_radius", self.player_radius)?;
        non_negative("thrust", self.thrust)?;
        non_negative("player_restitution", self.player_restitution)?;
        non_negative("stick_deadzone", self.stick_deadzone)?;
        if !self.rotate_step.is_finite() {
            return Err(ConfigError::NotFinite("rotate_step", self.rotate_step));
        }
        if let Some(max) = self.max_speed {
            positive("max_speed", max)?;
        }

        let start = self.player_start;
        let start_ok = match self.policy {
            BoundaryPolicy::Wrap => {
                start.is_finite()
                    && (0.0..width).contains(&start.x)
                    && (0.0..height).contains(&start.y)
            }
            BoundaryPolicy::BoundedElastic => {
                start.is_finite() && self.world.contains_circle(start, self.player_radius)
            }
        };
        if !start_ok {
            return Err(ConfigError::PlayerOutOfBounds {
                x: start.x,
                y: start.y,
            });
        }

        if self.obstacle_count > 0 {
            self.validate_obstacles()?;
        }
        Ok(())
    }

    fn validate_obstacles(&self) -> Result<(), ConfigError> {
        positive("obstacle_radius", self.obstacle_radius)?;

        let VelocityRange { min, max } = self.obstacle_velocity;
        if !min.is_finite() {
            return Err(ConfigError::NotFinite("obstacle_velocity.min", min));
        }
        if !max.is_finite() {
            return Err(ConfigError::NotFinite("obstacle_velocity.max", max));
        }
        if min > max {
            return Err(ConfigError::InvertedVelocityRange { min, max });
        }

        if self.layout.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        for index in 0..self.obstacle_count {
            let pos = self.layout.position(index);
            if !(pos.is_finite() && self.world.contains_circle(pos, self.obstacle_radius)) {
                return Err(ConfigError::SpawnOutOfBounds {
                    index,
                    x: pos.x,
                    y: pos.y,
                });
            }
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive(name, value))
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative(name, value))
    }
}
