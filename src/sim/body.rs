//! Moving bodies: the controlled body and every obstacle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::control::SteeringCommand;
use crate::polar_to_cartesian;
use crate::settings::ConfigError;

/// A simulated point mass with a circular collision extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    /// World units per tick
    pub vel: Vec2,
    /// Facing and thrust direction (radians)
    pub heading: f32,
    radius: f32,
}

impl Body {
    /// Create a body at rest, rejecting a radius that is not positive and finite
    pub fn try_new(id: u32, pos: Vec2, radius: f32) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::NotPositive("radius", radius));
        }
        Ok(Self::new(id, pos, radius))
    }

    /// Unchecked constructor for radii that settings validation already accepted
    pub(crate) fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            radius,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Apply a steering command and advance one tick.
    ///
    /// Forward thrust wins over reverse when both are asserted. Velocity is
    /// never damped here; any clamping is left to the physics backend.
    pub fn integrate(&mut self, command: &SteeringCommand, thrust: f32) {
        self.heading = command.heading;
        if command.thrust_forward {
            self.vel += polar_to_cartesian(thrust, self.heading);
        } else if command.thrust_reverse {
            self.vel += polar_to_cartesian(thrust, self.heading + std::f32::consts::PI);
        }
        self.advance();
    }

    /// Unscaled Euler step: position += velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(heading: f32) -> SteeringCommand {
        SteeringCommand {
            heading,
            thrust_forward: true,
            thrust_reverse: false,
        }
    }

    #[test]
    fn test_thrust_additivity() {
        let mut body = Body::new(1, Vec2::ZERO, 20.0);
        body.integrate(&forward(0.0), 10.0);
        assert!((body.vel.x - 10.0).abs() < 1e-6);
        assert!(body.vel.y.abs() < 1e-6);
        // Position advanced by the new velocity in the same tick
        assert!((body.pos.x - 10.0).abs() < 1e-6);

        body.integrate(&forward(0.0), 10.0);
        assert!((body.vel.x - 20.0).abs() < 1e-6);
        assert!((body.pos.x - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_reverse_thrust_pushes_backwards() {
        let mut body = Body::new(1, Vec2::ZERO, 20.0);
        let cmd = SteeringCommand {
            heading: 0.0,
            thrust_forward: false,
            thrust_reverse: true,
        };
        body.integrate(&cmd, 4.0);
        assert!((body.vel.x + 4.0).abs() < 1e-5);
        assert!(body.vel.y.abs() < 1e-5);
    }

    #[test]
    fn test_forward_wins_when_both_asserted() {
        let mut body = Body::new(1, Vec2::ZERO, 20.0);
        let cmd = SteeringCommand {
            heading: 0.0,
            thrust_forward: true,
            thrust_reverse: true,
        };
        body.integrate(&cmd, 3.0);
        assert!((body.vel.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_follows_command_without_thrust() {
        let mut body =
            Body::new(1, Vec2::new(5.0, 5.0), 20.0).with_velocity(Vec2::new(1.0, -1.0));
        let cmd = SteeringCommand {
            heading: 1.25,
            ..Default::default()
        };
        body.integrate(&cmd, 10.0);
        assert_eq!(body.heading, 1.25);
        assert_eq!(body.vel, Vec2::new(1.0, -1.0));
        assert_eq!(body.pos, Vec2::new(6.0, 4.0));
    }

    #[test]
    fn test_zero_velocity_body_stays_put() {
        let mut body = Body::new(7, Vec2::new(100.0, 200.0), 20.0);
        body.advance();
        assert_eq!(body.pos, Vec2::new(100.0, 200.0));
        assert_eq!(body.radius(), 20.0);
    }
    #[test]
    fn test_try_new_rejects_bad_radius() {
        for radius in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Body::try_new(1, Vec2::ZERO, radius),
                Err(ConfigError::NotPositive("radius", _))
            ));
        }
        let body = Body::try_new(2, Vec2::new(1.0, 2.0), 12.5).unwrap();
        assert_eq!(body.radius(), 12.5);
        assert_eq!(body.vel, Vec2::ZERO);
    }
}
