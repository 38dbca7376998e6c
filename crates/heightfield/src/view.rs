//! Camera placement around a bounding sphere.

use crate::bounds::BoundingSphere;
use crate::math::{look_at, multiply, perspective, rotation_x, rotation_y, Matrix4};

/// Accumulated drag rotation, in degrees. Unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitAngles {
    pub x_rot_deg: f32,
    pub y_rot_deg: f32,
}

impl OrbitAngles {
    /// Applies a pointer drag of `(dx, dy)` pixels: horizontal motion spins
    /// about Y, vertical motion tilts about X.
    pub fn drag(&mut self, dx: f32, dy: f32, degrees_per_px: f32) {
        self.y_rot_deg += dx * degrees_per_px;
        self.x_rot_deg += dy * degrees_per_px;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// Full vertical field of view.
    pub fovy_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            fovy_deg: 45.0,
            near: 1.0,
            far: 10_000.0,
        }
    }
}

/// Distance at which a sphere of `radius` fills the vertical field of view.
pub fn eye_distance(radius: f32, fovy_deg: f32) -> f32 {
    radius / (fovy_deg.to_radians() * 0.5).tan()
}

/// Eye on the -Z side of the sphere, looking at its center with +Y up,
/// then the model rotated by the orbit (Y first, then X).
pub fn model_view(sphere: &BoundingSphere, orbit: &OrbitAngles, fovy_deg: f32) -> Matrix4 {
    let [cx, cy, cz] = sphere.center;
    let eye = [cx, cy, cz - eye_distance(sphere.radius, fovy_deg)];
    let view = look_at(eye, sphere.center, [0.0, 1.0, 0.0]);

    let model = multiply(&rotation_x(orbit.x_rot_deg), &rotation_y(orbit.y_rot_deg));
    multiply(&view, &model)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub projection: Matrix4,
    pub model_view: Matrix4,
}

pub fn frame_matrices(
    sphere: &BoundingSphere,
    orbit: &OrbitAngles,
    params: &ViewParams,
    aspect: f32,
) -> FrameMatrices {
    FrameMatrices {
        projection: perspective(params.fovy_deg, aspect, params.near, params.far),
        model_view: model_view(sphere, orbit, params.fovy_deg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    const SPHERE: BoundingSphere = BoundingSphere {
        center: [0.0, 100.0, 0.0],
        radius: 50.0,
    };

    #[test]
    fn sphere_fills_the_vertical_view() {
        let d = eye_distance(1.0, 90.0);
        assert!((d - 1.0).abs() < 1e-6);
        assert!(eye_distance(50.0, 45.0) > 120.0);
    }

    #[test]
    fn unrotated_view_centers_the_sphere() {
        let mv = Mat4::from_cols_array(&model_view(&SPHERE, &OrbitAngles::default(), 45.0));
        let c = mv.transform_point3(Vec3::from(SPHERE.center));
        assert!(c.x.abs() < 1e-3 && c.y.abs() < 1e-3);
        assert!((c.z + eye_distance(50.0, 45.0)).abs() < 1e-3);
    }

    #[test]
    fn top_of_sphere_touches_the_frustum_edge() {
        let params = ViewParams::default();
        let m = frame_matrices(&SPHERE, &OrbitAngles::default(), &params, 1.0);
        let mvp = Mat4::from_cols_array(&m.projection) * Mat4::from_cols_array(&m.model_view);

        // Straight above the center, at the same depth: y/depth = tan(fovy/2).
        let top = Vec3::from(SPHERE.center) + Vec3::Y * SPHERE.radius;
        let clip = mvp * top.extend(1.0);
        assert!((clip.y / clip.w - 1.0).abs() < 1e-3);
        assert!(clip.x.abs() < 1e-3);
    }

    #[test]
    fn orbit_rotates_the_model_about_the_origin() {
        let orbit = OrbitAngles {
            x_rot_deg: 0.0,
            y_rot_deg: 90.0,
        };
        let still = Mat4::from_cols_array(&model_view(&SPHERE, &OrbitAngles::default(), 45.0));
        let spun = Mat4::from_cols_array(&model_view(&SPHERE, &orbit, 45.0));

        // +X rotates onto -Z before the view is applied.
        let a = spun.transform_point3(Vec3::X);
        let b = still.transform_point3(-Vec3::Z);
        assert!((a - b).length() < 1e-3);
    }

    #[test]
    fn drag_accumulates_without_wrapping() {
        let mut orbit = OrbitAngles::default();
        orbit.drag(10.0, -4.0, 0.5);
        orbit.drag(800.0, 0.0, 0.5);
        assert_eq!(orbit.y_rot_deg, 405.0);
        assert_eq!(orbit.x_rot_deg, -2.0);
        orbit.reset();
        assert_eq!(orbit, OrbitAngles::default());
    }
}
