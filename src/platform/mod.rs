//! Platform abstraction layer
//!
//! Browser-independent pieces of the shell:
//! - Input capture (pointer, touch, keyboard)
//! - Frame timing (fixed-step accumulator, FPS)

pub mod input;
pub mod time;

pub use input::{KeyCommand, PointerTracker, Steering};
pub use time::FrameClock;
