//! Visual settings and preferences
//!
//! Persisted separately from the best score, as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::{KeyValueStore, StoreError};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// Flat shapes only
    Low,
    /// Shadows, no fine detail
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset in the Low, Medium, High cycle
    pub fn next(self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    pub fn shadows_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    pub fn detail_enabled(&self) -> bool {
        matches!(self, QualityPreset::High)
    }
}

/// Render feature bits shared with the shader
pub mod render_flags {
    pub const SHADOWS: u32 = 1 << 0;
    pub const BALL_SEAMS: u32 = 1 << 1;
    pub const RACQUET_STRINGS: u32 = 1 << 2;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,
    /// Drop shadows under ball and racquet
    pub shadows: bool,
    /// White seam arcs on the ball
    pub ball_seams: bool,
    /// String grid on the racquet
    pub racquet_strings: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            shadows: true,
            ball_seams: true,
            racquet_strings: true,
            show_fps: false,
        }
    }
}

impl Settings {
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.shadows = preset.shadows_enabled();
        self.ball_seams = preset.detail_enabled();
        self.racquet_strings = preset.detail_enabled();
    }

    /// Effective render flags (the preset caps individual toggles)
    pub fn render_flags(&self) -> u32 {
        let mut flags = 0;
        if self.shadows && self.quality.shadows_enabled() {
            flags |= render_flags::SHADOWS;
        }
        if self.ball_seams && self.quality.detail_enabled() {
            flags |= render_flags::BALL_SEAMS;
        }
        if self.racquet_strings && self.quality.detail_enabled() {
            flags |= render_flags::RACQUET_STRINGS;
        }
        flags
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Settings unreadable ({}), using defaults", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self).map_err(|e| StoreError::Write {
            key: SETTINGS_KEY.to_string(),
            reason: e.to_string(),
        })?;
        store.set(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
