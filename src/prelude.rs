//! # Lantern Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use lantern::prelude::*;
//!
//! let sun = DirectionalLight::new(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
//! let mut scene = Scene::new(Camera::default(), (800, 600), &sun, Vector3::new(0.2, 0.2, 0.2));
//! scene
//!     .point_lights_mut()
//!     .push(PointLight::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(1.0, 0.5, 0.0), 2.0));
//!
//! let mut log = DrawLog::new();
//! scene.draw(&mut log, &mut Gizmos::new());
//! assert_eq!(scene.num_lights(), 1);
//! ```

// Application
pub use crate::app::LanternApp;
pub use crate::config::AppConfig;
pub use crate::error::{LanternError, Result};

// Scene and lighting
pub use crate::gfx::camera::Camera;
pub use crate::gfx::gizmos::Gizmos;
pub use crate::gfx::light::{DirectionalLight, Light, LightKind, PointLight, MAX_LIGHTS};
pub use crate::gfx::scene::{InstanceId, Mesh, ObjectInstance, Scene, Vertex};
pub use crate::gfx::shader::{ShaderProgram, UniformValue};

// Geometry
pub use crate::gfx::geometry::{generate_cube, generate_plane, generate_sphere, load_obj, unit_cube, MeshData};

// Rendering
pub use crate::gfx::rendering::{DrawLog, DrawTarget, FrameRecorder, PostEffect, RenderEngine};

// Input
pub use crate::input::{InputSnapshot, InputState, Key, MouseButton};

// Common external types
pub use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};
