//! Game state and core simulation types
//!
//! Everything the physics step reads or writes lives in [`GameState`], a small
//! `Copy` value passed in and returned from the pure update functions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Play surface dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen shown, nothing simulated yet
    Idle,
    /// Ball in play
    Running,
    /// Ball fell past the racquet
    GameOver { final_score: u32 },
}

/// Things the shell needs to react to after a tick or transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off the racquet
    Deflected { score: u32 },
    /// Session ended; `new_best` means `best` must be persisted
    GameOver { score: u32, best: u32, new_best: bool },
}

/// The tennis ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: f32,
    pub bounce: f32,
    pub friction: f32,
}

impl Ball {
    /// Ball at rest at its home position
    pub fn home(surface: Surface, tuning: &Tuning) -> Self {
        Self {
            pos: Self::home_pos(surface, tuning),
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            gravity: tuning.gravity,
            bounce: tuning.bounce,
            friction: tuning.friction,
        }
    }

    pub fn home_pos(surface: Surface, tuning: &Tuning) -> Vec2 {
        Vec2::new(surface.center_x(), surface.height - tuning.ball_home_offset)
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// The player's racquet. `pos.x` is the horizontal center, `pos.y` the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Target travel per tick when steered by keyboard
    pub speed: f32,
    /// Desired horizontal center, written only by input
    pub target_x: f32,
}

impl Paddle {
    pub fn home(surface: Surface, tuning: &Tuning) -> Self {
        let pos = Self::home_pos(surface, tuning);
        Self {
            pos,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            target_x: pos.x,
        }
    }

    pub fn home_pos(surface: Surface, tuning: &Tuning) -> Vec2 {
        Vec2::new(
            surface.center_x(),
            surface.height - tuning.paddle_home_offset,
        )
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.half_width()
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.half_width()
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Clamp a center x so the racquet stays on the surface.
    /// When the surface is narrower than the racquet the left bound wins.
    pub fn clamp_x(&self, x: f32, surface_width: f32) -> f32 {
        self.half_width()
            .max((surface_width - self.half_width()).min(x))
    }

    /// Ease toward the target by a fixed fraction, then clamp
    pub fn ease_toward_target(&mut self, ease: f32, surface_width: f32) {
        let dx = self.target_x - self.pos.x;
        self.pos.x = self.clamp_x(self.pos.x + dx * ease, surface_width);
    }
}

/// Complete session state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub surface: Surface,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Deflections this session
    pub score: u32,
    /// Best score ever (loaded from storage at startup)
    pub best: u32,
}

impl GameState {
    /// Idle state with everything at home
    pub fn new(surface: Surface, best: u32, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Idle,
            surface,
            ball: Ball::home(surface, tuning),
            paddle: Paddle::home(surface, tuning),
            score: 0,
            best,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Enter Running with ball, racquet and score reset
    pub fn start(self, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Running,
            ball: Ball::home(self.surface, tuning),
            paddle: Paddle::home(self.surface, tuning),
            score: 0,
            ..self
        }
    }

    /// Same as [`GameState::start`]
    pub fn restart(self, tuning: &Tuning) -> Self {
        self.start(tuning)
    }

    /// Leave Running, folding the score into the best score. Any other phase
    /// comes back unchanged and without an event.
    pub fn game_over(self) -> (Self, Option<GameEvent>) {
        if !self.is_running() {
            return (self, None);
        }
        let new_best = self.score > self.best;
        let best = self.best.max(self.score);
        let state = Self {
            phase: GamePhase::GameOver {
                final_score: self.score,
            },
            best,
            ..self
        };
        let event = GameEvent::GameOver {
            score: self.score,
            best,
            new_best,
        };
        (state, Some(event))
    }

    /// Adopt new surface dimensions and move ball and racquet back to their
    /// home positions. Velocities are left as they are.
    pub fn resize(mut self, surface: Surface, tuning: &Tuning) -> Self {
        self.surface = surface;
        self.ball.pos = Ball::home_pos(surface, tuning);
        self.paddle.pos = Paddle::home_pos(surface, tuning);
        self
    }

    /// Input entry point: set the racquet target. Ignored unless Running.
    pub fn with_target_x(mut self, x: f32) -> Self {
        if self.is_running() {
            self.paddle.target_x = x;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface {
        Surface::new(400.0, 600.0)
    }

    #[test]
    fn test_home_positions() {
        let tuning = Tuning::default();
        let state = GameState::new(surface(), 0, &tuning);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 500.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.paddle.pos, Vec2::new(200.0, 550.0));
        assert_eq!(state.paddle.target_x, 200.0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let tuning = Tuning::default();
        let canonical = GameState::new(surface(), 0, &tuning).start(&tuning);

        let mut state = canonical;
        state.ball.pos = Vec2::new(17.0, 590.0);
        state.ball.vel = Vec2::new(-3.0, 12.0);
        state.paddle.pos.x = 44.0;
        state.paddle.target_x = 10.0;
        state.score = 9;
        let (over, _) = state.game_over();
        assert!(!over.is_running());

        let restarted = over.restart(&tuning);
        assert_eq!(restarted.phase, GamePhase::Running);
        assert_eq!(restarted.ball, canonical.ball);
        assert_eq!(restarted.paddle, canonical.paddle);
        assert_eq!(restarted.score, 0);
        assert_eq!(restarted.best, 9);
    }

    #[test]
    fn test_game_over_tracks_best() {
        let tuning = Tuning::default();
        let mut state = GameState::new(surface(), 4, &tuning).start(&tuning);

        state.score = 3;
        let (state, event) = state.game_over();
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                score: 3,
                best: 4,
                new_best: false
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver { final_score: 3 });

        let mut state = state.start(&tuning);
        state.score = 6;
        let (state, event) = state.game_over();
        assert_eq!(
            event,
            Some(GameEvent::GameOver {
                score: 6,
                best: 6,
                new_best: true
            })
        );
        assert_eq!(state.best, 6);
    }

    #[test]
    fn test_game_over_only_leaves_running() {
        let tuning = Tuning::default();
        let idle = GameState::new(surface(), 2, &tuning);
        let (state, event) = idle.game_over();
        assert_eq!(event, None);
        assert_eq!(state, idle);

        let mut running = idle.start(&tuning);
        running.score = 5;
        let (over, event) = running.game_over();
        assert!(event.is_some());

        let (again, event) = over.game_over();
        assert_eq!(event, None, "a finished session ends once");
        assert_eq!(again, over);
        assert_eq!(again.best, 5);
    }

    #[test]
    fn test_target_ignored_unless_running() {
        let tuning = Tuning::default();
        let idle = GameState::new(surface(), 0, &tuning);
        assert_eq!(idle.with_target_x(10.0).paddle.target_x, 200.0);

        let running = idle.start(&tuning);
        assert_eq!(running.with_target_x(10.0).paddle.target_x, 10.0);
    }

    #[test]
    fn test_resize_recenters_but_keeps_velocity() {
        let tuning = Tuning::default();
        let mut state = GameState::new(surface(), 0, &tuning).start(&tuning);
        state.ball.vel = Vec2::new(2.0, -5.0);
        state.ball.pos = Vec2::new(30.0, 40.0);

        let resized = state.resize(Surface::new(800.0, 1000.0), &tuning);
        assert_eq!(resized.surface, Surface::new(800.0, 1000.0));
        assert_eq!(resized.ball.pos, Vec2::new(400.0, 900.0));
        assert_eq!(resized.ball.vel, Vec2::new(2.0, -5.0));
        assert_eq!(resized.paddle.pos, Vec2::new(400.0, 950.0));
    }

    #[test]
    fn test_clamp_on_narrow_surface() {
        let tuning = Tuning::default();
        let paddle = Paddle::home(Surface::new(50.0, 300.0), &tuning);
        // Racquet wider than the surface pins to its half width
        assert_eq!(paddle.clamp_x(-100.0, 50.0), 40.0);
        assert_eq!(paddle.clamp_x(100.0, 50.0), 40.0);
    }
}
