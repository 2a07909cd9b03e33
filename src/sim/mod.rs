//! Deterministic simulation module
//!
//! All movement logic lives here. This module must be pure and deterministic:
//! - One unscaled Euler step per tick
//! - Seeded RNG only
//! - Stable iteration order (by body id)
//! - No rendering or platform dependencies

pub mod body;
pub mod bounds;
pub mod collision;
pub mod control;
pub mod input;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use body::Body;
pub use bounds::{BoundaryPolicy, WorldBounds};
pub use collision::{
    ArcadePhysics, CollisionResult, PhysicsBackend, circle_circle_collision, reflect_velocity,
};
pub use control::{ArbiterConfig, ControlArbiter, ControlMode, SteeringCommand};
pub use input::{
    DirectionalKeys, GamepadState, InputQueue, InputSnapshot, Key, PointerState, RawInputEvent,
};
pub use obstacles::{ObstacleField, SpawnLayout, VelocityRange};
pub use state::{BodySnapshot, SimulationState};
pub use tick::{PLAYER_ID, Simulation};
