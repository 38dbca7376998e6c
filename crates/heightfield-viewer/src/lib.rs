// src/lib.rs
//! Interactive height-field viewer library.
//!
//! Decodes images, builds their height-field geometry with the `heightfield`
//! crate and draws it with wgpu, with an egui panel for switching the image,
//! topology and elevation channel.

pub mod app;
pub mod camera;
pub mod config;
pub mod data;
pub mod renderer;
pub mod ui;
