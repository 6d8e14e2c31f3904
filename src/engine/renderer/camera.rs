// Pixel-space camera for the fixed-size canvas

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Orthographic camera mapping canvas pixels to clip space.
///
/// The canvas has a fixed logical size with the origin at the top-left and
/// y growing downward, matching the simulation's coordinate system. The
/// viewport tracks the physical window size and only matters for mapping
/// cursor positions back onto the canvas.
#[derive(Debug, Clone)]
pub struct Camera {
    canvas: Vec2,
    viewport: Vec2,
    view_proj: Mat4,
}

impl Camera {
    /// Create a camera for a canvas of the given logical size
    pub fn new(canvas_width: f32, canvas_height: f32) -> Self {
        let canvas = Vec2::new(canvas_width, canvas_height);
        Self {
            canvas,
            viewport: canvas,
            view_proj: Mat4::orthographic_rh(0.0, canvas.x, canvas.y, 0.0, -100.0, 100.0),
        }
    }

    /// Track a new physical window size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Convert window coordinates to canvas coordinates
    pub fn screen_to_canvas(&self, screen: Vec2) -> Vec2 {
        screen / self.viewport * self.canvas
    }

    /// Canvas extents in pixels
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
