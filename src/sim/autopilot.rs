//! Idle/demo mode - the computer plays
//!
//! Predicts where the ball will cross the racquet line and parks the racquet
//! under it with a seeded random aim offset, so rallies wander left and right
//! instead of bouncing straight up forever. Now and then it aims to miss, which
//! lets headless replays terminate.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{reflect_side_walls, reflect_top};
use super::state::GameState;
use crate::tuning::Tuning;

/// Ticks to look ahead before giving up on a prediction
const MAX_LOOKAHEAD_TICKS: u32 = 600;
/// Hit position that is guaranteed to miss the racquet
const MISS_AIM: f32 = 3.0;

pub struct Autopilot {
    rng: Pcg32,
    /// Desired hit position, -1..1 across the racquet
    aim: f32,
    miss_chance: f64,
}

impl Autopilot {
    pub fn new(seed: u64, miss_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim: 0.0,
            miss_chance: miss_chance.clamp(0.0, 1.0),
        }
    }

    /// Target x for the racquet this tick
    pub fn target_for(&self, state: &GameState, tuning: &Tuning) -> f32 {
        let landing = predict_landing_x(state, tuning).unwrap_or(state.ball.pos.x);
        landing - self.aim * state.paddle.half_width()
    }

    /// Pick a fresh aim after every deflection
    pub fn on_deflection(&mut self) {
        self.aim = if self.rng.random_bool(self.miss_chance) {
            if self.rng.random_bool(0.5) { MISS_AIM } else { -MISS_AIM }
        } else {
            self.rng.random_range(-0.8..0.8)
        };
    }

    /// Back to center aim for a new session
    pub fn reset(&mut self) {
        self.aim = 0.0;
    }
}

/// Ball x when its bottom first reaches the racquet top, ignoring the racquet
pub fn predict_landing_x(state: &GameState, tuning: &Tuning) -> Option<f32> {
    let mut ball = state.ball;
    let paddle_top = state.paddle.top();

    for _ in 0..MAX_LOOKAHEAD_TICKS {
        ball.vel.y += ball.gravity;
        ball.pos.y += ball.vel.y;
        ball.pos.x += ball.vel.x;
        ball.vel.x *= ball.friction;
        reflect_side_walls(&mut ball, state.surface, tuning.wall_restitution);
        reflect_top(&mut ball);

        if ball.vel.y > 0.0 && ball.bottom() >= paddle_top {
            return Some(ball.pos.x);
        }
    }
    None
}
