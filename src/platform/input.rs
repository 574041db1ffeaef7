//! Pointer, touch and keyboard capture
//!
//! Handlers translate raw events into racquet targets. Coordinates arrive
//! already relative to the play surface; clamping happens in the sim.

/// Tracks whether a press (mouse button or finger) is in progress
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    active: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouse down / touch start: begin tracking and aim at `x`
    pub fn press(&mut self, x: f32) -> Option<f32> {
        self.active = true;
        Some(x)
    }

    /// Touch move, or mouse move with the primary button state.
    /// Drags without an active press are ignored.
    pub fn drag(&mut self, x: f32, primary_held: bool) -> Option<f32> {
        if !primary_held {
            self.active = false;
        }
        self.active.then_some(x)
    }

    /// Mouse up / leave, touch end / cancel. The target stays where it was.
    pub fn release(&mut self) {
        self.active = false;
    }
}

/// What a key press asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Steer,
    /// Start or restart when not running
    Start,
    /// Toggle idle/demo mode
    ToggleDemo,
    /// Step to the next quality preset
    CycleQuality,
    /// Show or hide the FPS readout
    ToggleFps,
    None,
}

/// Held arrow keys
#[derive(Debug, Clone, Copy, Default)]
pub struct Steering {
    left: bool,
    right: bool,
}

impl Steering {
    pub fn key_down(&mut self, key: &str) -> KeyCommand {
        match key {
            "ArrowLeft" | "a" | "A" => {
                self.left = true;
                KeyCommand::Steer
            }
            "ArrowRight" | "d" | "D" => {
                self.right = true;
                KeyCommand::Steer
            }
            " " | "Enter" => KeyCommand::Start,
            "i" | "I" => KeyCommand::ToggleDemo,
            "q" | "Q" => KeyCommand::CycleQuality,
            "f" | "F" => KeyCommand::ToggleFps,
            _ => KeyCommand::None,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowLeft" | "a" | "A" => self.left = false,
            "ArrowRight" | "d" | "D" => self.right = false,
            _ => {}
        }
    }

    /// -1 left, 1 right, 0 for none or both
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
