//! World bounds and boundary policies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// How the controlled body behaves at the edge of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Leaving one edge re-enters from the opposite edge
    #[default]
    Wrap,
    /// Contained by the physics backend with collision response at the edge
    BoundedElastic,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::Wrap => "wrap",
            BoundaryPolicy::BoundedElastic => "bounded-elastic",
        }
    }
}

/// Axis-aligned world rectangle `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// True if a circle at `pos` lies entirely inside the bounds
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= 0.0
            && pos.y - radius >= 0.0
            && pos.x + radius <= self.width
            && pos.y + radius <= self.height
    }

    /// Wrap the body's position into `[0, bound)` independently per axis
    pub fn wrap(&self, body: &mut Body) {
        body.pos.x = wrap_axis(body.pos.x, self.width);
        body.pos.y = wrap_axis(body.pos.y, self.height);
    }

    /// Keep a circle inside the bounds, inverting the velocity component
    /// that points into a wall. Returns true if any wall was touched.
    pub fn bounce(&self, body: &mut Body, restitution: f32) -> bool {
        let r = body.radius();
        let mut hit = false;

        if body.pos.x - r < 0.0 {
            body.pos.x = r;
            body.vel.x = body.vel.x.abs() * restitution;
            hit = true;
        } else if body.pos.x + r > self.width {
            body.pos.x = self.width - r;
            body.vel.x = -body.vel.x.abs() * restitution;
            hit = true;
        }

        if body.pos.y - r < 0.0 {
            body.pos.y = r;
            body.vel.y = body.vel.y.abs() * restitution;
            hit = true;
        } else if body.pos.y + r > self.height {
            body.pos.y = self.height - r;
            body.vel.y = -body.vel.y.abs() * restitution;
            hit = true;
        }

        hit
    }
}

#[inline]
fn wrap_axis(value: f32, bound: f32) -> f32 {
    if (0.0..bound).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(bound);
    // rem_euclid can round up to `bound` for tiny negative inputs
    if wrapped >= bound { 0.0 } else { wrapped }
}
