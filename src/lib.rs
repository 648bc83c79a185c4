// src/lib.rs
//! Lantern
//!
//! A small real-time 3D renderer built on wgpu and winit: a free-fly camera,
//! a directional sun and point lights, and a scene that composes uniforms and
//! draw calls every frame, followed by a post-processing pass.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::LanternApp;
pub use config::AppConfig;
pub use error::{LanternError, Result};
