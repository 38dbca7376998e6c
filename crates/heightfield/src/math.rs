//! Column-major 4x4 matrices as flat `[f32; 16]`, ready for uniform upload.
//!
//! Element `(row, col)` lives at `col * 4 + row`. Projections follow the
//! OpenGL clip convention (z in `[-1, 1]`); renderers targeting a `[0, 1]`
//! depth range apply their own correction.

use glam::{Mat4, Vec3};

pub type Matrix4 = [f32; 16];

/// Vectors shorter than this normalize to zero.
const NORMALIZE_EPSILON: f32 = 1e-5;

#[rustfmt::skip]
pub const IDENTITY: Matrix4 = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

#[inline]
pub fn identity() -> Matrix4 {
    IDENTITY
}

/// General perspective frustum between the given clip-plane extents.
#[rustfmt::skip]
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4 {
    [
        2.0 * near / (right - left), 0.0, 0.0, 0.0,
        0.0, 2.0 * near / (top - bottom), 0.0, 0.0,
        (right + left) / (right - left), (top + bottom) / (top - bottom), -(far + near) / (far - near), -1.0,
        0.0, 0.0, -2.0 * far * near / (far - near), 0.0,
    ]
}

/// Symmetric perspective projection; `fovy_deg` is the full vertical angle.
pub fn perspective(fovy_deg: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
    let top = near * (fovy_deg.to_radians() * 0.5).tan();
    let right = top * aspect;
    frustum(-right, right, -top, top, near, far)
}

fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < NORMALIZE_EPSILON {
        Vec3::ZERO
    } else {
        v / len
    }
}

/// View matrix looking from `eye` toward `target`.
///
/// Basis: `forward = normalize(eye - target)`, `right = normalize(up x
/// forward)`, `true_up = normalize(forward x right)`, followed by a
/// translation by `-eye`.
pub fn look_at(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Matrix4 {
    let eye = Vec3::from(eye);
    let n = normalize_or_zero(eye - Vec3::from(target));
    let u = normalize_or_zero(Vec3::from(up).cross(n));
    let v = normalize_or_zero(n.cross(u));

    #[rustfmt::skip]
    let rotation = [
        u.x, v.x, n.x, 0.0,
        u.y, v.y, n.y, 0.0,
        u.z, v.z, n.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];

    multiply(&rotation, &translation(-eye.x, -eye.y, -eye.z))
}

#[rustfmt::skip]
pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        x,   y,   z,   1.0,
    ]
}

/// Rotation about +X by `degrees` (right-handed).
pub fn rotation_x(degrees: f32) -> Matrix4 {
    Mat4::from_rotation_x(degrees.to_radians()).to_cols_array()
}

/// Rotation about +Y by `degrees` (right-handed).
pub fn rotation_y(degrees: f32) -> Matrix4 {
    Mat4::from_rotation_y(degrees.to_radians()).to_cols_array()
}

/// Product `a * b`: applying the result transforms by `b` first.
pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    (Mat4::from_cols_array(a) * Mat4::from_cols_array(b)).to_cols_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat_close(a: &Matrix4, b: &Matrix4, eps: f32) {
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert!((x - y).abs() <= eps, "element {i}: {x} != {y}\n{a:?}\n{b:?}");
        }
    }

    #[test]
    fn perspective_scale_terms() {
        let m = perspective(60.0, 1.0, 1.0, 100.0);
        let expected = 1.0 / 30f32.to_radians().tan();
        assert!((m[0] - expected).abs() < 1e-5);
        assert!((m[5] - expected).abs() < 1e-5);
        assert_eq!(m[11], -1.0);
        assert_eq!(m[15], 0.0);
    }

    #[test]
    fn perspective_matches_gl_convention() {
        let ours = perspective(45.0, 16.0 / 9.0, 1.0, 10_000.0);
        let reference =
            Mat4::perspective_rh_gl(45f32.to_radians(), 16.0 / 9.0, 1.0, 10_000.0).to_cols_array();
        assert_mat_close(&ours, &reference, 1e-4);
    }

    #[test]
    fn asymmetric_frustum_offsets() {
        let m = frustum(-1.0, 3.0, -2.0, 2.0, 1.0, 10.0);
        assert_eq!(m[0], 0.5);
        assert_eq!(m[5], 0.5);
        assert_eq!(m[8], 0.5);
        assert_eq!(m[9], 0.0);
    }

    #[test]
    fn look_at_matches_right_handed_view() {
        let eye = [3.0, 4.0, -20.0];
        let target = [1.0, 2.0, 5.0];
        let ours = look_at(eye, target, [0.0, 1.0, 0.0]);
        let reference = Mat4::look_at_rh(eye.into(), target.into(), Vec3::Y).to_cols_array();
        assert_mat_close(&ours, &reference, 1e-5);

        // The eye maps to the origin and the target lands on -Z.
        let m = Mat4::from_cols_array(&ours);
        assert!(m.transform_point3(eye.into()).length() < 1e-4);
        let t = m.transform_point3(target.into());
        assert!(t.x.abs() < 1e-4 && t.y.abs() < 1e-4 && t.z < 0.0);
    }

    #[test]
    fn look_at_with_parallel_up_degrades_to_zero_axes() {
        let m = look_at([0.0, 10.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        // right and true-up collapse; forward survives.
        assert_eq!([m[0], m[4], m[8]], [0.0, 0.0, 0.0]);
        assert_eq!([m[2], m[6], m[10]], [0.0, 1.0, 0.0]);
    }

    #[test]
    #[rustfmt::skip]
    fn rotations_match_explicit_forms() {
        let (s, c) = 30f32.to_radians().sin_cos();
        assert_mat_close(&rotation_x(30.0), &[
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ], 1e-6);
        assert_mat_close(&rotation_y(30.0), &[
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ], 1e-6);
    }

    #[test]
    fn multiply_is_column_major() {
        let t = translation(1.0, 2.0, 3.0);
        let r = rotation_y(90.0);

        // Translate after rotating: +X -> -Z, then shift.
        let m = Mat4::from_cols_array(&multiply(&t, &r));
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, 2.0)).length() < 1e-5);

        assert_eq!(multiply(&IDENTITY, &t), t);
        assert_eq!(multiply(&t, &identity()), t);
    }
}
