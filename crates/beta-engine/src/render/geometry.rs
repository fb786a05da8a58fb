//! Static quad geometry: four corners, two triangles.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
}

impl QuadVertex {
    /// Single position attribute at location 0, not normalized.
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }

    /// Tightly packed layout: the stride is exactly one position.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex::new(0.5, 0.5, 0.0),   // top right
    QuadVertex::new(0.5, -0.5, 0.0),  // bottom right
    QuadVertex::new(-0.5, -0.5, 0.0), // bottom left
    QuadVertex::new(-0.5, 0.5, 0.0),  // top left
];

pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

pub const QUAD_INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

/// Number of indices issued by one quad draw.
pub const QUAD_INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;
