//! # User Interface Module
//!
//! Dear ImGui overlay drawn on top of the post-processed frame.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`lighting_panel`] - Point light, gizmo and post effect controls
//!
//! ## Input Handling
//!
//! While the pointer or keyboard focus is over a UI window, events are not
//! forwarded to the camera input.

pub mod lighting_panel;
pub mod manager;

// Re-export main types
pub use lighting_panel::lighting_panel;
pub use manager::UiManager;
