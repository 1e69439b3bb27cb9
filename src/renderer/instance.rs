use glam::Affine2;

use super::atlas::TextureRegion;
use crate::color::Color;

/// One textured quad as uploaded to a per-instance vertex buffer.
///
/// The vertex shader expands the unit square `[0, 1]²` with
/// `x_axis * u + y_axis * v + translation` and samples between `uv_min` and
/// `uv_max`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileInstance {
    pub x_axis: [f32; 2],
    pub y_axis: [f32; 2],
    pub translation: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub tint: [f32; 4],
}

impl TileInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x2,  // x_axis
        1 => Float32x2,  // y_axis
        2 => Float32x2,  // translation
        3 => Float32x2,  // uv_min
        4 => Float32x2,  // uv_max
        5 => Float32x4,  // tint
    ];

    pub fn new(transform: &Affine2, region: &TextureRegion, tint: Color) -> Self {
        Self {
            x_axis: transform.matrix2.x_axis.to_array(),
            y_axis: transform.matrix2.y_axis.to_array(),
            translation: transform.translation.to_array(),
            uv_min: region.uv_min,
            uv_max: region.uv_max,
            tint: tint.0,
        }
    }

    /// Buffer layout stepping once per instance.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}
