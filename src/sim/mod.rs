//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - State in, state out
//! - Seeded RNG only (autopilot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::{Autopilot, predict_landing_x};
pub use collision::{ball_paddle_overlap, deflect, hit_position};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Surface};
pub use tick::{TickOutcome, tick};
