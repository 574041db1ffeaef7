//! Data-driven game balance
//!
//! All values are per simulation tick (see [`crate::consts::SIM_DT`]) and in
//! CSS pixels. Any field missing from a JSON override keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TUNING_KEY;
use crate::persistence::KeyValueStore;

/// Errors from loading or validating a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be zero or more (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("deflect_vy must point up, i.e. below zero (got {0})")]
    DeflectNotUpward(f32),
    #[error("paddle_home_offset {offset} puts the {height} high racquet off the surface")]
    RacquetOffSurface { offset: f32, height: f32 },
    #[error("{field} must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_radius: f32,
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Fraction of vy kept when bouncing off the top edge
    pub bounce: f32,
    /// Multiplier applied to vx every tick
    pub friction: f32,
    /// Fraction of vx kept when bouncing off the side walls
    pub wall_restitution: f32,
    /// Ball rest position above the bottom edge
    pub ball_home_offset: f32,

    // === Racquet ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Target travel per tick when steering with the keyboard
    pub paddle_speed: f32,
    /// Fraction of the remaining distance to target covered each tick
    pub paddle_ease: f32,
    /// Racquet top edge above the bottom edge
    pub paddle_home_offset: f32,

    // === Deflection ===
    /// Vertical velocity after a hit (negative is up)
    pub deflect_vy: f32,
    /// Horizontal velocity at the very edge of the racquet
    pub english: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: 20.0,
            gravity: 0.8,
            bounce: 0.7,
            friction: 0.98,
            wall_restitution: 0.8,
            ball_home_offset: 100.0,

            paddle_width: 80.0,
            paddle_height: 20.0,
            paddle_speed: 8.0,
            paddle_ease: 0.1,
            paddle_home_offset: 50.0,

            deflect_vy: -15.0,
            english: 8.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("ball_radius", self.ball_radius),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("paddle_speed", self.paddle_speed),
            ("english", self.english),
            ("ball_home_offset", self.ball_home_offset),
            ("paddle_home_offset", self.paddle_home_offset),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(TuningError::Negative { field, value });
            }
        }

        // Deflection must send the ball back up, off the racquet
        if !(self.deflect_vy < 0.0 && self.deflect_vy.is_finite()) {
            return Err(TuningError::DeflectNotUpward(self.deflect_vy));
        }

        if self.paddle_home_offset < self.paddle_height {
            return Err(TuningError::RacquetOffSurface {
                offset: self.paddle_home_offset,
                height: self.paddle_height,
            });
        }

        for (field, value) in [
            ("bounce", self.bounce),
            ("friction", self.friction),
            ("wall_restitution", self.wall_restitution),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        // Zero easing would freeze the racquet in place
        if !(self.paddle_ease > 0.0 && self.paddle_ease <= 1.0) {
            return Err(TuningError::OutOfRange {
                field: "paddle_ease",
                value: self.paddle_ease,
                min: 0.0,
                max: 1.0,
            });
        }

        Ok(())
    }

    /// Load the override from storage, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(TUNING_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning override: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Tuning override unavailable ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
