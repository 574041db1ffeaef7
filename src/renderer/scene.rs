//! Per-frame scene uniform
//!
//! Everything the fragment shader needs to repaint the surface, packed into
//! one 64-byte uniform. Built from the sim state without touching the GPU.

use bytemuck::{Pod, Zeroable};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::GameState;

/// Must match `struct Scene` in `sdf_shader.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    /// Play surface in CSS pixels
    pub surface: [f32; 2], // offset 0
    /// Device pixels per CSS pixel
    pub pixel_ratio: f32, // offset 8
    /// `settings::render_flags` bits
    pub flags: u32, // offset 12
    /// x, y, radius, shadow offset
    pub ball: [f32; 4], // offset 16
    /// center x, top y, width, height
    pub paddle: [f32; 4], // offset 32
    /// handle width, handle height, vertical strings, horizontal strings
    pub racquet: [f32; 4], // offset 48
}

impl SceneUniform {
    pub fn new(state: &GameState, settings: &Settings, pixel_ratio: f32) -> Self {
        let ball = &state.ball;
        let paddle = &state.paddle;
        Self {
            surface: [state.surface.width, state.surface.height],
            pixel_ratio: pixel_ratio.max(f32::EPSILON),
            flags: settings.render_flags(),
            ball: [ball.pos.x, ball.pos.y, ball.radius, SHADOW_OFFSET],
            paddle: [paddle.pos.x, paddle.pos.y, paddle.width, paddle.height],
            racquet: [
                HANDLE_WIDTH,
                HANDLE_HEIGHT,
                VERTICAL_STRINGS as f32,
                HORIZONTAL_STRINGS as f32,
            ],
        }
    }

    /// Empty scene used to size the buffer before the first frame
    pub fn zeroed_for(pixel_ratio: f32) -> Self {
        Self {
            pixel_ratio: pixel_ratio.max(f32::EPSILON),
            ..Self::zeroed()
        }
    }
}
