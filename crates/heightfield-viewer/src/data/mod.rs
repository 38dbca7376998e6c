// src/data/mod.rs
//! Data handling modules for the height-field viewer.
//!
//! This module provides functionality for:
//! - Finding and decoding images into pixel fields.
//! - Uploading scene buffers to the GPU and refreshing them per event.

pub mod image_source;
pub mod mesh;
pub mod types;

// Re-export commonly used types for convenience.
pub use self::types::{MeshGpu, MeshUniforms};
