//! # Scene Composition
//!
//! Per-frame scene assembly: a [`Scene`] owns a camera, point lights and a
//! list of [`ObjectInstance`]s, and draws them through a
//! [`DrawTarget`](crate::gfx::rendering::DrawTarget).
//!
//! - [`Mesh`] - GPU vertex/index buffers, initialized once
//! - [`ObjectInstance`] - a mesh, a shader program and a transform
//! - [`Scene`] - update and draw orchestration
//! - [`Vertex`] / [`ScreenVertex`] - vertex formats
//!
//! ```no_run
//! use std::rc::Rc;
//! use cgmath::Vector3;
//! use lantern::gfx::{
//!     camera::Camera,
//!     gizmos::Gizmos,
//!     light::DirectionalLight,
//!     rendering::DrawLog,
//!     scene::{Mesh, ObjectInstance, Scene},
//!     shader::ShaderProgram,
//! };
//!
//! let sun = DirectionalLight::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
//! let mut scene = Scene::new(Camera::default(), (1280, 720), &sun, Vector3::new(0.25, 0.25, 0.25));
//! scene.add_object_instance(ObjectInstance::new(
//!     Rc::new(ShaderProgram::phong()),
//!     Rc::new(Mesh::new("cube")),
//!     cgmath::Matrix4::from_scale(5.0),
//! ));
//!
//! let mut log = DrawLog::new();
//! scene.draw(&mut log, &mut Gizmos::new());
//! ```

pub mod mesh;
pub mod object;
pub mod scene;
pub mod vertex;

pub use mesh::Mesh;
pub use object::ObjectInstance;
pub use scene::{InstanceId, Scene};
pub use vertex::{ScreenVertex, Vertex, VertexLayout};
