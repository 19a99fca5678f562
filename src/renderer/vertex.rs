//! Vertex types for 2D rendering

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
    /// Night-court backdrop
    pub const BACKGROUND: [f32; 4] = [0.05, 0.08, 0.20, 1.0];
    pub const BALL_FILL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL_LINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKBOARD_FILL: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
    pub const BACKBOARD_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Orange-red rim bar
    pub const RIM: [f32; 4] = [1.0, 0.27, 0.0, 1.0];
    pub const NET: [f32; 4] = [1.0, 1.0, 1.0, 0.7];

    /// Pastel debris palette (peach, lavender, powder blue, coral)
    pub const PARTICLE_PALETTE: [[f32; 4]; 4] = [
        [1.0, 0.855, 0.725, 1.0],
        [0.902, 0.902, 0.980, 1.0],
        [0.690, 0.878, 0.902, 1.0],
        [0.941, 0.502, 0.502, 1.0],
    ];
}
