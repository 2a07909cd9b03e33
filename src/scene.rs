//! Host-facing scene glue
//!
//! Rendering and scene management live outside this crate. `MainScene` owns
//! the pending input queue, drives one simulation tick per frame and talks to
//! those collaborators through `RenderSink` and `SceneLifecycle`.

use serde::{Deserialize, Serialize};

use crate::settings::{ConfigError, Settings};
use crate::sim::{
    ArcadePhysics, InputQueue, PhysicsBackend, RawInputEvent, Simulation, SimulationState,
};

/// Scenes the host can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKey {
    Main,
    GameOver,
}

/// Draws the post-tick state
pub trait RenderSink {
    fn present(&mut self, state: &SimulationState);
}

/// Receives scene lifecycle signals
pub trait SceneLifecycle {
    /// The scene finished setting up and is ready to tick
    fn ready(&mut self, scene: SceneKey);
    /// The scene asks the host to switch to another scene
    fn transition(&mut self, to: SceneKey);
}

/// The playable scene
pub struct MainScene<P: PhysicsBackend = ArcadePhysics> {
    sim: Simulation<P>,
    input: InputQueue,
    ready_sent: bool,
    ended: bool,
}

impl MainScene<ArcadePhysics> {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Ok(Self::with_simulation(Simulation::with_arcade_physics(settings)?))
    }
}

impl<P: PhysicsBackend> MainScene<P> {
    pub fn with_simulation(sim: Simulation<P>) -> Self {
        Self {
            sim,
            input: InputQueue::new(),
            ready_sent: false,
            ended: false,
        }
    }

    /// Signal readiness to the host. Only the first call notifies.
    pub fn create(&mut self, lifecycle: &mut impl SceneLifecycle) {
        if self.ready_sent {
            return;
        }
        self.ready_sent = true;
        log::info!("Main scene ready");
        lifecycle.ready(SceneKey::Main);
    }

    /// Device callback entry point. Events take effect at the next update.
    pub fn handle_event(&mut self, event: RawInputEvent) {
        self.input.push(event);
    }

    /// Run one frame: drain input, tick, present. Returns `None` once ended.
    pub fn update(&mut self, render: &mut impl RenderSink) -> Option<SimulationState> {
        if self.ended {
            return None;
        }
        let pending = self.input.pending();
        if pending > 0 {
            log::trace!("Tick {}: draining {} input events", self.sim.ticks() + 1, pending);
        }
        let snapshot = self.input.snapshot();
        let state = self.sim.tick(&snapshot);
        render.present(&state);
        Some(state)
    }

    /// External end trigger: leave for the game-over scene
    pub fn end(&mut self, lifecycle: &mut impl SceneLifecycle) {
        if self.ended {
            return;
        }
        self.ended = true;
        log::info!("Main scene ended after {} ticks", self.sim.ticks());
        lifecycle.transition(SceneKey::GameOver);
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn simulation(&self) -> &Simulation<P> {
        &self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ArenaPreset;
    use crate::sim::{ControlMode, Key};
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<SimulationState>,
        ready: Vec<SceneKey>,
        transitions: Vec<SceneKey>,
    }

    impl RenderSink for Recorder {
        fn present(&mut self, state: &SimulationState) {
            self.frames.push(state.clone());
        }
    }

    impl SceneLifecycle for Recorder {
        fn ready(&mut self, scene: SceneKey) {
            self.ready.push(scene);
        }

        fn transition(&mut self, to: SceneKey) {
            self.transitions.push(to);
        }
    }

    fn scene() -> MainScene {
        MainScene::new(Settings::from_preset(ArenaPreset::ScreenWrap)).unwrap()
    }

    #[test]
    fn test_ready_signalled_once() {
        let mut scene = scene();
        let mut host = Recorder::default();
        scene.create(&mut host);
        scene.create(&mut host);
        assert_eq!(host.ready, vec![SceneKey::Main]);
    }

    #[test]
    fn test_events_apply_at_next_update() {
        let mut scene = scene();
        let mut host = Recorder::default();
        scene.handle_event(RawInputEvent::KeyDown(Key::ArrowUp));
        assert_eq!(scene.simulation().ticks(), 0);
        assert_eq!(scene.simulation().player().vel, Vec2::ZERO);

        let state = scene.update(&mut host).unwrap();
        assert_eq!(scene.simulation().arbiter().mode(), ControlMode::Keyboard);
        assert!(state.command.thrust_forward);
        assert_eq!(host.frames.len(), 1);
        assert_eq!(host.frames[0], state);
    }

    #[test]
    fn test_pointer_down_thrusts_towards_pointer() {
        let mut scene = scene();
        let mut host = Recorder::default();
        let center = Vec2::new(512.0, 384.0);
        scene.handle_event(RawInputEvent::PointerMove(center + Vec2::new(0.0, 100.0)));
        scene.handle_event(RawInputEvent::PointerDown);
        let state = scene.update(&mut host).unwrap();
        assert!(state.player.vel.x.abs() < 1e-4);
        assert!((state.player.vel.y - 10.0).abs() < 1e-4);

        scene.handle_event(RawInputEvent::PointerUp);
        let state = scene.update(&mut host).unwrap();
        assert!(!state.command.thrust_forward);
    }

    #[test]
    fn test_end_transitions_and_stops_ticking() {
        let mut scene = scene();
        let mut host = Recorder::default();
        scene.create(&mut host);
        assert!(scene.update(&mut host).is_some());

        scene.end(&mut host);
        scene.end(&mut host);
        assert!(scene.is_ended());
        assert_eq!(host.transitions, vec![SceneKey::GameOver]);
        assert!(scene.update(&mut host).is_none());
        assert_eq!(host.frames.len(), 1);
    }
}
