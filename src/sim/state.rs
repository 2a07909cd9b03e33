//! Read-only snapshot handed to the render collaborator after each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::control::SteeringCommand;
use crate::consts::{HEADING_LINE_LENGTH, VELOCITY_LINE_SCALE};
use crate::polar_to_cartesian;

/// Render-facing view of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f32,
    pub radius: f32,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            pos: body.pos,
            vel: body.vel,
            heading: body.heading,
            radius: body.radius(),
        }
    }
}

impl BodySnapshot {
    /// End point of the facing indicator line
    pub fn heading_tip(&self) -> Vec2 {
        self.pos + polar_to_cartesian(HEADING_LINE_LENGTH, self.heading)
    }

    /// End point of the velocity indicator line
    pub fn velocity_tip(&self) -> Vec2 {
        self.pos + self.vel * VELOCITY_LINE_SCALE
    }
}

/// World state after a completed tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Number of ticks completed
    pub tick: u64,
    /// Command applied to the controlled body this tick
    pub command: SteeringCommand,
    pub player: BodySnapshot,
    /// Obstacles in stable id order
    pub obstacles: Vec<BodySnapshot>,
}
