//! GPU-side data for one height-field mesh.

use heightfield::IndexWidth;

/// Per-frame uniform block. Must match `MeshUniforms` in `heightfield.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct MeshUniforms {
    /// Model-view matrix, column-major.
    pub model_view: [f32; 16],
    /// Projection already corrected to wgpu clip space, column-major.
    pub projection: [f32; 16],
}

const _: [(); 128] = [(); core::mem::size_of::<MeshUniforms>()];

/// Vertex, color and index buffers of the loaded scene.
///
/// Positions and colors live in separate vertex buffers so that a channel
/// switch re-uploads only the positions.
#[derive(Debug)]
pub struct MeshGpu {
    pub positions: wgpu::Buffer,
    pub colors: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
    pub vertex_count: u32,
}

pub fn index_format(width: IndexWidth) -> wgpu::IndexFormat {
    match width {
        IndexWidth::U16 => wgpu::IndexFormat::Uint16,
        IndexWidth::U32 => wgpu::IndexFormat::Uint32,
    }
}
