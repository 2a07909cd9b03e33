//! Input arbitration
//!
//! Exactly one device owns the controlled body at a time. Each tick the
//! arbiter evaluates the claims in fixed priority order (keyboard, pointer,
//! gamepad), allows at most one mode switch, and derives a `SteeringCommand`
//! from whichever device is active.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::InputSnapshot;
use crate::angle_between;
use crate::consts::ROTATE_STEP;

/// Device currently authoritative for the controlled body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    #[default]
    Pointer,
    Keyboard,
    Gamepad,
}

/// Per-tick steering intent, independent of the device that produced it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringCommand {
    /// Desired heading (radians)
    pub heading: f32,
    pub thrust_forward: bool,
    pub thrust_reverse: bool,
}

/// Arbiter tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbiterConfig {
    /// Keyboard rotation per tick (radians)
    pub rotate_step: f32,
    /// Stick deflection at or below this magnitude counts as centred
    pub stick_deadzone: f32,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            rotate_step: ROTATE_STEP,
            stick_deadzone: 0.0,
        }
    }
}

/// Owns the active `ControlMode` and the last commanded heading
#[derive(Debug, Clone)]
pub struct ControlArbiter {
    config: ArbiterConfig,
    mode: ControlMode,
    heading: f32,
    /// The gamepad claims control on its first connection only
    gamepad_claim_spent: bool,
}

impl ControlArbiter {
    pub fn new(config: ArbiterConfig, initial_heading: f32) -> Self {
        Self {
            config,
            mode: ControlMode::default(),
            heading: initial_heading,
            gamepad_claim_spent: false,
        }
    }

    /// Currently active device
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Advance one tick. `origin` is the controlled body's current position,
    /// used to aim at the pointer.
    pub fn update(&mut self, input: &InputSnapshot, origin: Vec2) -> SteeringCommand {
        self.arbitrate(input);

        let mut command = SteeringCommand {
            heading: self.heading,
            ..Default::default()
        };

        match self.mode {
            ControlMode::Keyboard => {
                let keys = input.keys;
                if keys.left {
                    command.heading -= self.config.rotate_step;
                } else if keys.right {
                    command.heading += self.config.rotate_step;
                }
                command.thrust_forward = keys.up;
                command.thrust_reverse = keys.down;
            }
            ControlMode::Pointer => {
                command.heading = angle_between(origin, input.pointer.world_pos);
                command.thrust_forward = input.pointer.button_down;
            }
            ControlMode::Gamepad => {
                let stick = input.stick();
                if stick.length() > self.config.stick_deadzone {
                    command.heading = stick.y.atan2(stick.x);
                    command.thrust_forward = true;
                }
            }
        }

        self.heading = command.heading;
        command
    }

    /// Apply at most one mode switch, highest priority first
    fn arbitrate(&mut self, input: &InputSnapshot) {
        // A connection event is spent on the tick it arrives even if a
        // higher-priority device wins that tick.
        let gamepad_claim = input.gamepad.connected && !self.gamepad_claim_spent;
        if input.gamepad.connected {
            self.gamepad_claim_spent = true;
        }

        let next = if input.keys.any() {
            Some(ControlMode::Keyboard)
        } else if input.pointer_activity() && self.mode != ControlMode::Pointer {
            Some(ControlMode::Pointer)
        } else if gamepad_claim {
            Some(ControlMode::Gamepad)
        } else {
            None
        };

        match next {
            Some(next) if next != self.mode => {
                log::debug!("Control mode {:?} -> {:?}", self.mode, next);
                self.mode = next;
            }
            _ => {}
        }
    }
}
