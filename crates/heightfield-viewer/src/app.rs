use crate::{
    camera::{mesh_uniforms, CameraController},
    config::Config,
    data::{image_source, types::MeshGpu, MeshUniforms},
    renderer::Renderer,
    ui::{self, PanelState, SceneStats, UiActions},
};
use anyhow::Result;
use heightfield::{math, OrbitAngles, SceneEvent, SceneSettings, SceneState, ViewParams};
use std::{path::PathBuf, sync::Arc};
use winit::{event::WindowEvent, window::Window};

fn event_label(event: &SceneEvent) -> String {
    match event {
        SceneEvent::ImageLoaded(field) => format!("image {}x{}", field.width(), field.height()),
        SceneEvent::TopologyChanged(t) => format!("topology {t}"),
        SceneEvent::ChannelChanged(c) => format!("channel {c}"),
    }
}

pub struct App {
    pub renderer: Renderer,
    pub orbit: OrbitAngles,
    pub camera_controller: CameraController,
    pub view: ViewParams,
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    /// Selections, also used before any image is loaded.
    pub settings: SceneSettings,
    pub images: Vec<PathBuf>,
    current_image: Option<usize>,
    scene: Option<SceneState>,
    mesh: Option<MeshGpu>,
}

impl App {
    pub async fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            &*window,
            None,
            None,
        );

        Ok(Self {
            renderer,
            orbit: OrbitAngles::default(),
            camera_controller: CameraController::new(config.drag_degrees_per_px),
            view: config.view_params(),
            egui_ctx,
            egui_state,
            settings: config.scene_settings(),
            images: Vec::new(),
            current_image: None,
            scene: None,
            mesh: None,
        })
    }

    pub fn scene(&self) -> Option<&SceneState> {
        self.scene.as_ref()
    }

    /// Lists the images under `root` and opens the first one.
    pub fn open_images(&mut self, root: &std::path::Path) -> Result<()> {
        self.images = image_source::list_images(root);
        log::info!("Found {} image(s) under '{}'", self.images.len(), root.display());

        if !self.images.is_empty() {
            self.open_image(0)?;
        }
        Ok(())
    }

    /// Decodes `images[index]` and makes it the current scene. On failure the
    /// previous scene stays.
    pub fn open_image(&mut self, index: usize) -> Result<()> {
        let Some(path) = self.images.get(index) else {
            anyhow::bail!("no image at index {index}");
        };

        let field = image_source::load_image(path)?;
        if self.apply(SceneEvent::ImageLoaded(field)) {
            self.current_image = Some(index);
        }
        Ok(())
    }

    /// Routes one scene event, refreshing the GPU buffers it invalidated.
    /// Returns `true` when something visible changed.
    pub fn apply(&mut self, event: SceneEvent) -> bool {
        let label = event_label(&event);
        let device = &self.renderer.gfx.device;

        let Some(scene) = self.scene.as_mut() else {
            return match event {
                SceneEvent::ImageLoaded(field) => match SceneState::load(field, self.settings) {
                    Ok(scene) => {
                        self.mesh = Some(MeshGpu::upload(device, &scene));
                        self.scene = Some(scene);
                        true
                    }
                    Err(err) => {
                        log::error!("Rejected {}: {}", label, err);
                        false
                    }
                },
                SceneEvent::TopologyChanged(topology) => {
                    self.settings.topology = topology;
                    false
                }
                SceneEvent::ChannelChanged(channel) => {
                    self.settings.channel = channel;
                    false
                }
            };
        };

        match scene.apply(event) {
            Ok(rebuilt) => {
                self.settings = *scene.settings();
                if let Some(mesh) = self.mesh.as_mut() {
                    mesh.refresh(device, scene, rebuilt);
                }
                log::debug!("Applied {}", label);
                rebuilt.any()
            }
            Err(err) => {
                log::warn!("Rejected {}: {}", label, err);
                false
            }
        }
    }

    fn apply_actions(&mut self, actions: UiActions) -> bool {
        let mut changed = false;

        if let Some(index) = actions.image {
            let before = self.current_image;
            if let Err(err) = self.open_image(index) {
                log::error!("Failed to open image: {:#}", err);
            }
            changed |= self.current_image != before;
        }
        if let Some(topology) = actions.topology {
            changed |= self.apply(SceneEvent::TopologyChanged(topology));
        }
        if let Some(channel) = actions.channel {
            changed |= self.apply(SceneEvent::ChannelChanged(channel));
        }
        if actions.reset_view && self.orbit != OrbitAngles::default() {
            self.orbit.reset();
            changed = true;
        }

        changed
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.renderer.resize(new_size);
        }
    }

    /// Feeds `event` to egui, then to the orbit controller. Returns `true`
    /// when egui consumed it; asks for a redraw when anything changed.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        if response.repaint {
            window.request_redraw();
        }
        if response.consumed {
            return true;
        }

        if self.camera_controller.handle_event(event, &mut self.orbit) {
            window.request_redraw();
        }

        if let WindowEvent::Resized(physical_size) = event {
            self.resize(*physical_size);
            window.request_redraw();
        }

        false
    }

    fn uniforms(&self) -> MeshUniforms {
        match &self.scene {
            Some(scene) => {
                mesh_uniforms(&scene.frame(&self.orbit, &self.view, self.renderer.gfx.aspect()))
            }
            None => MeshUniforms {
                model_view: math::identity(),
                projection: math::identity(),
            },
        }
    }

    fn stats(&self) -> Option<SceneStats> {
        self.scene.as_ref().map(|scene| SceneStats {
            width: scene.width(),
            height: scene.height(),
            vertices: scene.positions().len(),
            indices: scene.indices().len(),
            index_width: scene.index_width(),
            topology: scene.topology(),
            sphere: *scene.sphere(),
        })
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = self.uniforms();
        self.renderer.render(
            &swap_view,
            self.mesh.as_ref(),
            self.settings.topology,
            &uniforms,
        );

        let egui_input = self.egui_state.take_egui_input(window);
        self.egui_ctx.begin_frame(egui_input);

        let actions = ui::draw_panel(
            &self.egui_ctx,
            &PanelState {
                images: &self.images,
                current_image: self.current_image,
                topology: self.settings.topology,
                channel: self.settings.channel,
            },
        );
        ui::draw_hud(&self.egui_ctx, self.stats().as_ref());

        let egui_output = self.egui_ctx.end_frame();
        self.egui_state
            .handle_platform_output(window, egui_output.platform_output);

        let shapes = self
            .egui_ctx
            .tessellate(egui_output.shapes, self.egui_ctx.pixels_per_point());

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.renderer.gfx.config.width,
                self.renderer.gfx.config.height,
            ],
            pixels_per_point: self.egui_ctx.pixels_per_point(),
        };

        let mut encoder = self
            .renderer
            .gfx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("UI Encoder"),
            });

        for (id, delta) in &egui_output.textures_delta.set {
            self.renderer.egui_renderer.update_texture(
                &self.renderer.gfx.device,
                &self.renderer.gfx.queue,
                *id,
                delta,
            );
        }

        self.renderer.egui_renderer.update_buffers(
            &self.renderer.gfx.device,
            &self.renderer.gfx.queue,
            &mut encoder,
            &shapes,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("EGUI Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &swap_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer
                .egui_renderer
                .render(&mut render_pass, &shapes, &screen_descriptor);
        }

        for id in &egui_output.textures_delta.free {
            self.renderer.egui_renderer.free_texture(id);
        }

        self.renderer
            .gfx
            .queue
            .submit(std::iter::once(encoder.finish()));
        frame.present();

        // Panel selections take effect on the next frame.
        let egui_wants_repaint = egui_output
            .viewport_output
            .get(&self.egui_ctx.viewport_id())
            .is_some_and(|v| v.repaint_delay.is_zero());
        if self.apply_actions(actions) || egui_wants_repaint {
            window.request_redraw();
        }

        Ok(())
    }
}
