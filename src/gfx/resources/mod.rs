// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Render targets and depth buffers.

pub mod texture_resource;

pub use texture_resource::TextureResource;
