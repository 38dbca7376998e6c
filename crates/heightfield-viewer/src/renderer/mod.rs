//! Owns the GPU context, the depth target and the mesh pipelines.

pub mod context;
pub mod pipelines;
pub mod targets;

use self::{context::GfxContext, pipelines::mesh::MeshPipeline, targets::Targets};
use crate::data::types::{MeshGpu, MeshUniforms};
use heightfield::Topology;
use std::sync::Arc;
use winit::window::Window;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

pub struct Renderer {
    pub gfx: GfxContext,
    pub targets: Targets,
    pub mesh: MeshPipeline,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let gfx = GfxContext::new(window).await?;
        let targets = Targets::new(&gfx.device, gfx.size);
        let mesh = MeshPipeline::new(&gfx.device, gfx.config.format, targets.depth_fmt);
        let egui_renderer =
            egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Ok(Self {
            gfx,
            targets,
            mesh,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.gfx.resize(new_size);
            self.targets.resize(&self.gfx.device, new_size);
        }
    }

    /// Clears the frame and draws `mesh` (if any) with `topology`.
    pub fn render(
        &mut self,
        swap_view: &wgpu::TextureView,
        mesh: Option<&MeshGpu>,
        topology: Topology,
        uniforms: &MeshUniforms,
    ) {
        self.mesh.write_uniforms(&self.gfx.queue, uniforms);

        let mut encoder = self
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Height-field Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(mesh) = mesh {
                self.mesh.draw(&mut pass, mesh, topology);
            }
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
    }
}
