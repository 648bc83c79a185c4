//! Free-fly camera driven by per-frame input snapshots.

pub mod camera_utils;
pub mod fly_camera;

// Re-export main types
pub use camera_utils::{forward_from_angles, right_from_azimuth, OPENGL_TO_WGPU_MATRIX};
pub use fly_camera::Camera;
