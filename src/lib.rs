//! Tennis Bounce - keep the ball in the air with a racquet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, session phases)
//! - `renderer`: WebGPU SDF rendering pipeline
//! - `platform`: Pointer/touch/keyboard capture and frame timing
//! - `persistence`: Key-value storage and the best score record
//! - `ui`: HUD and overlay collaborators
//! - `app`: The I/O shell driving everything once per animation frame
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::App;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Tuning values are expressed per tick at this rate.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// LocalStorage key for the best score (shared with the original web build)
    pub const BEST_SCORE_KEY: &str = "tennisBestScore";
    /// LocalStorage key for an optional tuning override
    pub const TUNING_KEY: &str = "tennis_tuning";
    /// LocalStorage key for visual settings
    pub const SETTINGS_KEY: &str = "tennis_settings";

    /// Shadow offset for ball and racquet (pixels, both axes)
    pub const SHADOW_OFFSET: f32 = 3.0;
    /// Racquet handle size
    pub const HANDLE_WIDTH: f32 = 16.0;
    pub const HANDLE_HEIGHT: f32 = 30.0;
    /// Racquet string grid
    pub const VERTICAL_STRINGS: u32 = 8;
    pub const HORIZONTAL_STRINGS: u32 = 4;
}
