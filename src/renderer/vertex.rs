//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Color;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// #f54b64
    pub const RED: [f32; 4] = [0.961, 0.294, 0.392, 1.0];
    /// #4ba3f5
    pub const BLUE: [f32; 4] = [0.294, 0.639, 0.961, 1.0];
    /// Player disc fill (#0b0d1d)
    pub const PLAYER_CORE: [f32; 4] = [0.043, 0.051, 0.114, 1.0];
    /// Background gradient, top-left (#10142a) to bottom-right (#05060f)
    pub const BACKGROUND_TOP: [f32; 4] = [0.063, 0.078, 0.165, 1.0];
    pub const BACKGROUND_BOTTOM: [f32; 4] = [0.020, 0.024, 0.059, 1.0];
    /// Gates are drawn slightly translucent
    pub const GATE_ALPHA: f32 = 0.85;
}

/// Fill color for a game color
pub fn fill(color: Color) -> [f32; 4] {
    match color {
        Color::Red => colors::RED,
        Color::Blue => colors::BLUE,
    }
}
