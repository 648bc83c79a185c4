// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! The [`DrawTarget`] submission surface, the GPU frame recorder that
//! implements it, render pipelines and the frame renderer.

pub mod draw_target;
pub mod frame;
pub mod pipeline_manager;
pub mod post_process;
pub mod render_engine;
pub mod uniforms;

// Re-export main types
pub use draw_target::{DrawCommand, DrawLog, DrawTarget};
pub use frame::{FrameRecorder, RecordedDraw};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use post_process::PostProcess;
pub use render_engine::{RenderEngine, RenderSettings};
pub use uniforms::{DrawUniforms, PostEffect};
