//! Vertex types and palette for the 2D scene

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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
    pub const SKY_TOP: [f32; 4] = [0.31, 0.75, 0.79, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.66, 0.89, 0.86, 1.0];
    pub const HILLS: [f32; 4] = [0.45, 0.78, 0.47, 1.0];
    pub const GROUND: [f32; 4] = [0.87, 0.84, 0.58, 1.0];
    pub const GROUND_STRIPE: [f32; 4] = [0.52, 0.81, 0.28, 1.0];
    pub const PIPE: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const PIPE_CAP: [f32; 4] = [0.36, 0.62, 0.13, 1.0];
    pub const BIRD: [f32; 4] = [0.98, 0.80, 0.18, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.99, 0.93, 0.62, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [0.95, 0.42, 0.16, 1.0];
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    /// Dim overlay drawn over a finished run
    pub const ENDED_SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
}
