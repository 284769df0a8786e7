//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA, straight (non-premultiplied) alpha, sRGB-encoded
pub type Color = [f32; 4];

/// Simple 2D vertex with position (NDC) and color
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

/// `0xRRGGBB` plus alpha to a color
pub const fn hex(rgb: u32, alpha: f32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, hex};

    pub const BACKGROUND: Color = hex(0x09090b, 1.0);
    pub const GRID: Color = hex(0xa855f7, 0.2);
    pub const PLATFORM: Color = hex(0x18181b, 1.0);
    pub const ENEMY: Color = hex(0xef4444, 1.0);
    pub const ENEMY_EYE: Color = hex(0x000000, 0.5);
    pub const GAP: Color = hex(0x3b82f6, 1.0);
    pub const GAP_ARROW: Color = hex(0x60a5fa, 1.0);

    pub const CYAN: Color = hex(0x06b6d4, 1.0);
    pub const AMBER: Color = hex(0xfbbf24, 1.0);
    pub const RED: Color = hex(0xef4444, 1.0);

    pub const PLAYER_HEAD: Color = hex(0x0891b2, 1.0);
    pub const SWORD: Color = hex(0xe2e8f0, 1.0);
    pub const SHADOW: Color = hex(0x000000, 0.5);
    pub const WHITE: Color = hex(0xffffff, 1.0);
}
