//! Session shell
//!
//! Owns the simulation state and wires it to input, storage and the HUD. The
//! browser entry point forwards DOM events here and draws `state()` after each
//! frame; the native build drives it headlessly.

use crate::persistence::{KeyValueStore, load_best, save_best};
use crate::platform::{FrameClock, KeyCommand, PointerTracker, Steering};
use crate::settings::Settings;
use crate::sim::{Autopilot, GameEvent, GameState, Surface, tick};
use crate::tuning::Tuning;
use crate::ui::{Hud, Overlay};

/// Chance per deflection that the demo player aims to miss
const DEMO_MISS_CHANCE: f64 = 0.05;

pub struct App<S: KeyValueStore, H: Hud> {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    store: S,
    hud: H,
    pointer: PointerTracker,
    steering: Steering,
    clock: FrameClock,
    /// Present while idle/demo mode is on
    autopilot: Option<Autopilot>,
    demo_seed: u64,
}

impl<S: KeyValueStore, H: Hud> App<S, H> {
    pub fn new(store: S, mut hud: H, tuning: Tuning, surface: Surface, seed: u64) -> Self {
        let best = load_best(&store);
        let settings = Settings::load(&store);
        let state = GameState::new(surface, best, &tuning);

        hud.set_score(0);
        hud.set_best(best);
        hud.show_overlay(Overlay::StartScreen, 0);
        hud.show_fps(settings.show_fps);

        Self {
            state,
            tuning,
            settings,
            store,
            hud,
            pointer: PointerTracker::new(),
            steering: Steering::default(),
            clock: FrameClock::new(),
            autopilot: None,
            demo_seed: seed,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn demo_active(&self) -> bool {
        self.autopilot.is_some()
    }

    /// Enter Running from any phase. Returns true when the caller has to
    /// schedule a frame loop (none is running yet).
    pub fn start(&mut self) -> bool {
        let was_running = self.state.is_running();
        self.state = self.state.start(&self.tuning);
        self.clock.reset();
        if let Some(pilot) = self.autopilot.as_mut() {
            pilot.reset();
        }

        self.hud.set_score(0);
        self.hud.show_overlay(Overlay::None, 0);
        log::info!("Session started (best {})", self.state.best);
        !was_running
    }

    pub fn restart(&mut self) -> bool {
        self.start()
    }

    /// Run one animation frame at `time` (ms). Returns whether to keep looping.
    pub fn frame(&mut self, time: f64) -> bool {
        let steps = self.clock.advance(time);
        for _ in 0..steps {
            if !self.state.is_running() {
                break;
            }
            self.step();
        }
        if self.settings.show_fps {
            self.hud.set_fps(self.clock.fps());
        }
        self.state.is_running()
    }

    /// Advance a single simulation tick
    pub fn step(&mut self) {
        let direction = self.steering.direction();
        if direction != 0.0 {
            let paddle = &self.state.paddle;
            let target = paddle.clamp_x(
                paddle.target_x + direction * paddle.speed,
                self.state.surface.width,
            );
            self.state = self.state.with_target_x(target);
        }
        if let Some(pilot) = &self.autopilot {
            let target = pilot.target_for(&self.state, &self.tuning);
            self.state = self.state.with_target_x(target);
        }

        let outcome = tick(self.state, &self.tuning);
        self.state = outcome.state;

        match outcome.event {
            Some(GameEvent::Deflected { score }) => {
                log::debug!("Deflection, score {}", score);
                self.hud.set_score(score);
                if let Some(pilot) = self.autopilot.as_mut() {
                    pilot.on_deflection();
                }
            }
            Some(GameEvent::GameOver {
                score,
                best,
                new_best,
            }) => self.on_game_over(score, best, new_best),
            None => {}
        }
    }

    fn on_game_over(&mut self, score: u32, best: u32, new_best: bool) {
        log::info!("Game over with score {}", score);
        if new_best {
            log::info!("New best score {}", best);
            self.hud.set_best(best);
            if let Err(e) = save_best(&mut self.store, best) {
                log::warn!("Could not save best score: {}", e);
            }
        }
        self.steering.clear();
        self.hud.show_overlay(Overlay::GameOver, score);
    }

    fn aim(&mut self, target: Option<f32>) {
        if let Some(x) = target {
            self.state = self.state.with_target_x(x);
        }
    }

    /// Mouse down / touch start at surface-relative `x`
    pub fn pointer_down(&mut self, x: f32) {
        if !self.state.is_running() {
            return;
        }
        let target = self.pointer.press(x);
        self.aim(target);
    }

    /// Mouse move; `primary_held` is the primary button state of the event
    pub fn pointer_move(&mut self, x: f32, primary_held: bool) {
        if !self.state.is_running() {
            return;
        }
        let target = self.pointer.drag(x, primary_held);
        self.aim(target);
    }

    /// Touch move
    pub fn touch_move(&mut self, x: f32) {
        self.pointer_move(x, true);
    }

    /// Mouse up / leave, touch end / cancel
    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    /// Returns true when a frame loop has to be scheduled
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.steering.key_down(key) {
            KeyCommand::Start if !self.state.is_running() => self.start(),
            KeyCommand::ToggleDemo => {
                self.set_demo(!self.demo_active());
                if self.demo_active() && !self.state.is_running() {
                    self.start()
                } else {
                    false
                }
            }
            KeyCommand::CycleQuality => {
                let preset = self.settings.quality.next();
                self.settings.apply_preset(preset);
                log::info!("Quality: {}", preset.as_str());
                self.save_settings();
                false
            }
            KeyCommand::ToggleFps => {
                self.settings.show_fps = !self.settings.show_fps;
                self.hud.show_fps(self.settings.show_fps);
                self.save_settings();
                false
            }
            _ => false,
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.steering.key_up(key);
    }

    pub fn set_demo(&mut self, on: bool) {
        if on {
            self.demo_seed = self.demo_seed.wrapping_add(1);
            self.autopilot = Some(Autopilot::new(self.demo_seed, DEMO_MISS_CHANCE));
        } else {
            self.autopilot = None;
        }
        log::info!("Demo mode: {}", on);
    }

    /// Container resized: adopt the new dimensions and recenter
    pub fn resize(&mut self, surface: Surface) {
        self.state = self.state.resize(surface, &self.tuning);
        log::info!("Surface resized to {}x{}", surface.width, surface.height);
    }
}
