//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position, texture coordinate and tint color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Untextured vertex (samples the white texel)
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [0.0, 0.0],
            color,
        }
    }

    pub const fn textured(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
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
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: (2 * std::mem::size_of::<[f32; 2]>()) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.94, 0.94, 0.94, 1.0]; // #f0f0f0
    pub const CROSSHAIR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
    pub const PROJECTILE: [f32; 4] = [0.2, 0.2, 0.25, 1.0];
    /// Sprite tint (identity)
    pub const SPRITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const OVERLAY_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
    pub const RETRY_BOX: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
}
