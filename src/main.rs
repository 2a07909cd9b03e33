//! Thrust Arena headless runner
//!
//! Runs the main scene with a scripted input timeline and logs the result.
//!
//! Usage: `thrust-arena [preset|settings.json] [ticks]`

use std::process::ExitCode;

use glam::Vec2;

use thrust_arena::scene::{MainScene, RenderSink, SceneKey, SceneLifecycle};
use thrust_arena::sim::{Key, RawInputEvent, SimulationState};
use thrust_arena::{ArenaPreset, Settings};

const DEFAULT_TICKS: u64 = 240;

/// Logs a summary line every second of frames
struct LogRenderer {
    every: u64,
    last: Option<SimulationState>,
}

impl RenderSink for LogRenderer {
    fn present(&mut self, state: &SimulationState) {
        if state.tick % self.every == 0 {
            let p = &state.player;
            log::info!(
                "tick {:>4}: pos ({:.1}, {:.1}) vel ({:.1}, {:.1}) heading {:.2}",
                state.tick,
                p.pos.x,
                p.pos.y,
                p.vel.x,
                p.vel.y,
                p.heading
            );
        }
        self.last = Some(state.clone());
    }
}

struct Host;

impl SceneLifecycle for Host {
    fn ready(&mut self, scene: SceneKey) {
        log::info!("Scene ready: {:?}", scene);
    }

    fn transition(&mut self, to: SceneKey) {
        log::info!("Switching to scene {:?}", to);
    }
}

/// Device events delivered before the given tick
fn scripted_events(tick: u64, center: Vec2) -> Vec<RawInputEvent> {
    match tick {
        0 => vec![
            RawInputEvent::PointerMove(center + Vec2::new(300.0, -200.0)),
            RawInputEvent::PointerDown,
        ],
        30 => vec![RawInputEvent::PointerUp],
        60 => vec![RawInputEvent::KeyDown(Key::D), RawInputEvent::KeyDown(Key::W)],
        90 => vec![RawInputEvent::KeyUp(Key::W)],
        100 => vec![RawInputEvent::KeyUp(Key::D), RawInputEvent::KeyDown(Key::ArrowDown)],
        120 => vec![RawInputEvent::KeyUp(Key::ArrowDown)],
        150 => vec![
            RawInputEvent::GamepadConnected,
            RawInputEvent::GamepadStick(Vec2::new(-0.7, 0.7)),
        ],
        180 => vec![RawInputEvent::GamepadStick(Vec2::ZERO)],
        200 => vec![RawInputEvent::PointerMove(center)],
        _ => Vec::new(),
    }
}

fn load_settings(arg: Option<&str>) -> Result<Settings, String> {
    match arg {
        None => Ok(Settings::default()),
        Some(name) => match ArenaPreset::from_str(name) {
            Some(preset) => Ok(Settings::from_preset(preset)),
            None => Settings::load(name).map_err(|e| e.to_string()),
        },
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Thrust Arena (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match load_settings(args.first().map(String::as_str)) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let ticks = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let center = settings.world.center();
    let mut scene = match MainScene::new(settings) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Cannot start simulation: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut host = Host;
    let mut renderer = LogRenderer {
        every: 60,
        last: None,
    };
    scene.create(&mut host);

    for tick in 0..ticks {
        for event in scripted_events(tick, center) {
            scene.handle_event(event);
        }
        scene.update(&mut renderer);
    }
    scene.end(&mut host);

    if let Some(state) = renderer.last {
        match serde_json::to_string_pretty(&state.player) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        }
    }

    ExitCode::SUCCESS
}
