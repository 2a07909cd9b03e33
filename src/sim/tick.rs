//! Fixed-order simulation tick
//!
//! Each tick runs, in this order and without skipping:
//! 1. arbitrate input into a steering command
//! 2. integrate the controlled body
//! 3. apply the boundary policy to the controlled body
//! 4. advance and bounce every obstacle, then resolve contacts
//! 5. re-apply the boundary policy and obstacle bounce after contacts
//! 6. clamp the controlled body's speed (bounded worlds only)
//! 7. emit a snapshot for rendering
//!
//! Contacts use plain world-space distance, so bodies on opposite sides of
//! a wrap seam never touch.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::Body;
use super::bounds::BoundaryPolicy;
use super::collision::{ArcadePhysics, PhysicsBackend};
use super::control::{ArbiterConfig, ControlArbiter};
use super::input::InputSnapshot;
use super::obstacles::ObstacleField;
use super::state::{BodySnapshot, SimulationState};
use crate::settings::{ConfigError, Settings};

/// Id of the controlled body; obstacles are numbered after it
pub const PLAYER_ID: u32 = 0;

/// The whole simulated world plus its physics backend
#[derive(Debug)]
pub struct Simulation<P: PhysicsBackend = ArcadePhysics> {
    settings: Settings,
    arbiter: ControlArbiter,
    player: Body,
    obstacles: ObstacleField,
    physics: P,
    tick: u64,
}

impl Simulation<ArcadePhysics> {
    /// Simulation backed by `ArcadePhysics` configured from `settings`
    pub fn with_arcade_physics(settings: Settings) -> Result<Self, ConfigError> {
        let physics = ArcadePhysics {
            wall_restitution: settings.player_restitution,
            body_restitution: 1.0,
            max_speed: settings.max_speed,
        };
        Self::new(settings, physics)
    }
}

impl<P: PhysicsBackend> Simulation<P> {
    /// Validate `settings` and spawn all bodies
    pub fn new(settings: Settings, physics: P) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let player = Body::new(PLAYER_ID, settings.player_start, settings.player_radius);
        let obstacles = ObstacleField::initialize(
            settings.obstacle_count,
            &settings.layout,
            settings.obstacle_radius,
            settings.obstacle_velocity,
            PLAYER_ID + 1,
            &mut rng,
        );
        let arbiter = ControlArbiter::new(
            ArbiterConfig {
                rotate_step: settings.rotate_step,
                stick_deadzone: settings.stick_deadzone,
            },
            player.heading,
        );

        log::info!(
            "Simulation started: {}x{} {}, {} obstacles, seed {}",
            settings.world.width,
            settings.world.height,
            settings.policy.as_str(),
            obstacles.len(),
            settings.seed
        );

        Ok(Self {
            settings,
            arbiter,
            player,
            obstacles,
            physics,
            tick: 0,
        })
    }

    /// Advance the world by one tick
    pub fn tick(&mut self, input: &InputSnapshot) -> SimulationState {
        let bounds = self.settings.world;

        let command = self.arbiter.update(input, self.player.pos);
        self.player.integrate(&command, self.settings.thrust);

        self.apply_player_boundary();

        self.obstacles.advance(&bounds);
        if self.settings.collisions {
            self.physics
                .resolve_collisions(&mut self.player, self.obstacles.bodies_mut());
            // Contact separation can push bodies across the edge
            self.apply_player_boundary();
            self.obstacles.contain(&bounds);
        }

        if self.settings.policy == BoundaryPolicy::BoundedElastic {
            self.physics.clamp_velocity(&mut self.player);
        }

        self.tick += 1;

        SimulationState {
            tick: self.tick,
            command,
            player: BodySnapshot::from(&self.player),
            obstacles: self.obstacles.bodies().iter().map(BodySnapshot::from).collect(),
        }
    }

    fn apply_player_boundary(&mut self) {
        let bounds = self.settings.world;
        match self.settings.policy {
            BoundaryPolicy::Wrap => bounds.wrap(&mut self.player),
            BoundaryPolicy::BoundedElastic => self.physics.contain(&mut self.player, &bounds),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> &Body {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn arbiter(&self) -> &ControlArbiter {
        &self.arbiter
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }
}
