// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Typed uniform buffers and binding-type shorthands.

pub mod binding_types;
pub mod uniform_buffer;

pub use binding_types::*;
pub use uniform_buffer::{align_to, DynamicUniformBuffer, UniformBuffer};
