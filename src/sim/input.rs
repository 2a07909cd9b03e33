//! Device input normalization
//!
//! Device callbacks never touch simulation state. They push `RawInputEvent`s
//! into an `InputQueue`, and the tick loop drains the queue exactly once per
//! tick into an immutable `InputSnapshot`.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys that steer the controlled body (arrows and WASD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

/// Direction a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    pub fn direction(self) -> Direction {
        match self {
            Key::ArrowUp | Key::W => Direction::Up,
            Key::ArrowDown | Key::S => Direction::Down,
            Key::ArrowLeft | Key::A => Direction::Left,
            Key::ArrowRight | Key::D => Direction::Right,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Raw event as delivered by a device callback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RawInputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer moved to the given world position
    PointerMove(Vec2),
    PointerDown,
    PointerUp,
    GamepadConnected,
    GamepadDisconnected,
    /// Left stick deflection, each axis in [-1, 1]
    GamepadStick(Vec2),
}

/// Directional key state with arrows and WASD folded together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Pointer state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// Last known pointer position in world coordinates
    pub world_pos: Vec2,
    /// Button currently held
    pub button_down: bool,
    /// A move event arrived since the previous tick
    pub moved: bool,
    /// A down event arrived since the previous tick
    pub pressed: bool,
}

/// Gamepad state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadState {
    /// Stick vector, `None` when no pad is attached
    pub stick: Option<Vec2>,
    /// A connection event arrived since the previous tick
    pub connected: bool,
}

/// Normalized input for exactly one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub keys: DirectionalKeys,
    pub pointer: PointerState,
    pub gamepad: GamepadState,
}

impl InputSnapshot {
    /// Stick deflection, zero when missing or malformed
    pub fn stick(&self) -> Vec2 {
        match self.gamepad.stick {
            Some(v) if v.is_finite() => v,
            _ => Vec2::ZERO,
        }
    }

    /// Pointer activity that may claim control this tick
    pub fn pointer_activity(&self) -> bool {
        self.pointer.moved || self.pointer.pressed
    }
}

/// Pending device events plus the held state they accumulate into
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<RawInputEvent>,
    held_keys: u8,
    pointer_pos: Vec2,
    pointer_down: bool,
    pad_attached: bool,
    stick: Vec2,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event from a device callback
    pub fn push(&mut self, event: RawInputEvent) {
        self.pending.push_back(event);
    }

    /// Number of events waiting for the next tick
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drain all pending events into the snapshot for the next tick
    pub fn snapshot(&mut self) -> InputSnapshot {
        let mut moved = false;
        let mut pressed = false;
        let mut connected = false;

        while let Some(event) = self.pending.pop_front() {
            match event {
                RawInputEvent::KeyDown(key) => self.held_keys |= key.bit(),
                RawInputEvent::KeyUp(key) => self.held_keys &= !key.bit(),
                RawInputEvent::PointerMove(pos) => {
                    if pos.is_finite() {
                        self.pointer_pos = pos;
                        moved = true;
                    } else {
                        log::warn!("Ignoring non-finite pointer position {:?}", pos);
                    }
                }
                RawInputEvent::PointerDown => {
                    self.pointer_down = true;
                    pressed = true;
                }
                RawInputEvent::PointerUp => self.pointer_down = false,
                RawInputEvent::GamepadConnected => {
                    self.pad_attached = true;
                    connected = true;
                }
                RawInputEvent::GamepadDisconnected => {
                    self.pad_attached = false;
                    self.stick = Vec2::ZERO;
                }
                RawInputEvent::GamepadStick(v) => {
                    if !self.pad_attached {
                        log::warn!("Stick input without a connected gamepad");
                    } else if v.is_finite() {
                        self.stick = v;
                    } else {
                        log::warn!("Treating non-finite stick input as centred");
                        self.stick = Vec2::ZERO;
                    }
                }
            }
        }

        InputSnapshot {
            keys: self.keys(),
            pointer: PointerState {
                world_pos: self.pointer_pos,
                button_down: self.pointer_down,
                moved,
                pressed,
            },
            gamepad: GamepadState {
                stick: self.pad_attached.then_some(self.stick),
                connected,
            },
        }
    }

    fn keys(&self) -> DirectionalKeys {
        let mut keys = DirectionalKeys::default();
        for key in [
            Key::ArrowUp,
            Key::ArrowDown,
            Key::ArrowLeft,
            Key::ArrowRight,
            Key::W,
            Key::A,
            Key::S,
            Key::D,
        ] {
            if self.held_keys & key.bit() == 0 {
                continue;
            }
            match key.direction() {
                Direction::Up => keys.up = true,
                Direction::Down => keys.down = true,
                Direction::Left => keys.left = true,
                Direction::Right => keys.right = true,
            }
        }
        keys
    }
}
