//! # Graphics Module
//!
//! Everything between the application driver and the GPU.
//!
//! ## Architecture Overview
//!
//! - **Camera** ([`camera`]) - Free-fly camera driven by input snapshots
//! - **Lights** ([`light`]) - Directional sun and point lights
//! - **Scene** ([`scene`]) - Meshes, object instances and per-frame composition
//! - **Shaders** ([`shader`]) - Named WGSL programs and uniform values
//! - **Rendering** ([`rendering`]) - Draw submission, pipelines and the frame renderer
//! - **Gizmos** ([`gizmos`]) - Debug lines and spheres
//! - **Geometry** ([`geometry`]) - Procedural primitives and OBJ import
//! - **Resources** ([`resources`]) - Render targets and depth buffers
//!
//! ## Usage
//!
//! Scene code never touches wgpu directly. It draws into a
//! [`DrawTarget`](rendering::DrawTarget); the [`RenderEngine`] replays what
//! was recorded.
//!
//! ```
//! use cgmath::Vector3;
//! use lantern::gfx::{
//!     camera::Camera,
//!     gizmos::Gizmos,
//!     light::DirectionalLight,
//!     rendering::DrawLog,
//!     scene::Scene,
//! };
//!
//! let sun = DirectionalLight::new(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
//! let mut scene = Scene::new(Camera::default(), (1280, 720), &sun, Vector3::new(0.1, 0.1, 0.1));
//!
//! let mut log = DrawLog::new();
//! scene.draw(&mut log, &mut Gizmos::new());
//! assert_eq!(log.draw_count(), 0);
//! ```

pub mod camera;
pub mod geometry;
pub mod gizmos;
pub mod light;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shader;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use rendering::render_engine::RenderEngine;
