use crate::data::types::{index_format, MeshGpu};
use heightfield::{Rebuilt, SceneState};
use wgpu::util::DeviceExt;

fn positions_buffer(device: &wgpu::Device, scene: &SceneState) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Heightfield Positions"),
        contents: bytemuck::cast_slice(scene.positions()),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

fn colors_buffer(device: &wgpu::Device, scene: &SceneState) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Heightfield Colors"),
        contents: bytemuck::cast_slice(scene.colors()),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

fn indices_buffer(device: &wgpu::Device, scene: &SceneState) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Heightfield Indices"),
        contents: scene.indices().as_bytes(),
        usage: wgpu::BufferUsages::INDEX,
    })
}

impl MeshGpu {
    /// Uploads every buffer of `scene`.
    pub fn upload(device: &wgpu::Device, scene: &SceneState) -> Self {
        Self {
            positions: positions_buffer(device, scene),
            colors: colors_buffer(device, scene),
            indices: indices_buffer(device, scene),
            index_count: scene.indices().len() as u32,
            index_format: index_format(scene.index_width()),
            vertex_count: scene.positions().len() as u32,
        }
    }

    /// Replaces the buffers named in `rebuilt`; the others stay as they are.
    pub fn refresh(&mut self, device: &wgpu::Device, scene: &SceneState, rebuilt: Rebuilt) {
        if rebuilt.positions {
            self.positions = positions_buffer(device, scene);
            self.vertex_count = scene.positions().len() as u32;
        }
        if rebuilt.colors {
            self.colors = colors_buffer(device, scene);
        }
        if rebuilt.indices {
            self.indices = indices_buffer(device, scene);
            self.index_count = scene.indices().len() as u32;
            self.index_format = index_format(scene.index_width());
        }

        log::debug!(
            "GPU buffers refreshed (positions={}, colors={}, indices={})",
            rebuilt.positions,
            rebuilt.colors,
            rebuilt.indices
        );
    }
}
