//! Thrust Arena - a single controllable body in a 2D arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input arbitration, integration, obstacles)
//! - `settings`: Configuration, presets and validation
//! - `scene`: Render and scene-lifecycle collaborator interfaces

pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::{ArenaPreset, ConfigError, Settings};

use glam::Vec2;

/// Simulation design constants
pub mod consts {
    /// Per-tick angular increment for keyboard rotation (radians)
    pub const ROTATE_STEP: f32 = 0.05;
    /// Velocity added per tick of thrust
    pub const PLAYER_THRUST: f32 = 10.0;
    /// Collision radius of the controlled body
    pub const PLAYER_RADIUS: f32 = 20.0;

    /// Collision radius of every obstacle
    pub const OBSTACLE_RADIUS: f32 = 20.0;
    /// Initial obstacle velocity range, sampled per axis
    pub const OBSTACLE_VELOCITY_MIN: f32 = -50.0;
    pub const OBSTACLE_VELOCITY_MAX: f32 = 50.0;

    /// Large arena used by the obstacle presets
    pub const ARENA_SIZE: f32 = 5000.0;
    /// Viewport-sized arena for the pure screen-wrap preset
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;

    /// Length of the heading indicator line drawn from the body centre
    pub const HEADING_LINE_LENGTH: f32 = 30.0;
    /// Velocity indicator line is velocity scaled by this factor
    pub const VELOCITY_LINE_SCALE: f32 = 0.1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle of the ray from `from` towards `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
