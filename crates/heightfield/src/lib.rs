//! Height-field geometry: one color channel of an RGBA image becomes the
//! elevation of a `width x height` vertex grid.
//!
//! - [`pixels`]: normalized RGBA samples and the channel selector.
//! - [`vertices`]: positions `(x - w/2, sample * 255, -(y - h/2))` and
//!   pass-through colors.
//! - [`indices`]: triangle strip, triangle list, line list and point list
//!   index buffers in 16- or 32-bit storage.
//! - [`bounds`]: approximate bounding sphere used to frame the camera.
//! - [`math`], [`view`]: column-major 4x4 matrices and camera placement.
//! - [`scene`]: the buffers of one loaded image, rebuilt per event.
//!
//! Everything here is synchronous and free of global state. Invalid input
//! is reported through [`HeightfieldError`]; nothing panics on bad
//! dimensions or selectors.

pub mod bounds;
pub mod error;
pub mod indices;
pub mod math;
pub mod pixels;
pub mod scene;
pub mod vertices;
pub mod view;

pub use bounds::{bounding_sphere_with, compute_bounding_sphere, BoundingSphere, SphereMethod};
pub use error::{HeightfieldError, Result};
pub use indices::{build_indices, IndexBuffer, IndexWidth, Topology};
pub use math::Matrix4;
pub use pixels::{Channel, PixelField};
pub use scene::{IndexWidthPolicy, Rebuilt, SceneEvent, SceneSettings, SceneState};
pub use vertices::{build_colors, build_vertices};
pub use view::{FrameMatrices, OrbitAngles, ViewParams};
