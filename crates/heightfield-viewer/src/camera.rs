use crate::data::types::MeshUniforms;
use glam::Mat4;
use heightfield::{FrameMatrices, OrbitAngles};
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Converts OpenGL clip space (z in [-1, 1]) to wgpu clip space (z in [0, 1]).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Packs the frame matrices for upload, remapping the projection's depth.
pub fn mesh_uniforms(frame: &FrameMatrices) -> MeshUniforms {
    let projection = OPENGL_TO_WGPU_MATRIX * Mat4::from_cols_array(&frame.projection);

    MeshUniforms {
        model_view: frame.model_view,
        projection: projection.to_cols_array(),
    }
}

/// Turns left-button drags into orbit angles.
pub struct CameraController {
    mouse_down: bool,
    last_mouse: Option<(f64, f64)>,
    degrees_per_px: f32,
}

impl CameraController {
    pub fn new(degrees_per_px: f32) -> Self {
        Self {
            mouse_down: false,
            last_mouse: None,
            degrees_per_px,
        }
    }

    /// Returns `true` when `orbit` changed.
    pub fn handle_event(&mut self, event: &WindowEvent, orbit: &mut OrbitAngles) -> bool {
        match event {
            WindowEvent::MouseInput { button, state, .. } if *button == MouseButton::Left => {
                self.mouse_down = *state == ElementState::Pressed;
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor((position.x, position.y), orbit)
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_mouse = None;
                false
            }
            _ => false,
        }
    }

    fn handle_cursor(&mut self, xy: (f64, f64), orbit: &mut OrbitAngles) -> bool {
        let mut moved = false;
        if let Some(last) = self.last_mouse {
            if self.mouse_down {
                let dx = (xy.0 - last.0) as f32;
                let dy = (xy.1 - last.1) as f32;
                if dx != 0.0 || dy != 0.0 {
                    orbit.drag(dx, dy, self.degrees_per_px);
                    moved = true;
                }
            }
        }
        self.last_mouse = Some(xy);
        moved
    }
}
