//! # Gizmo System
//!
//! Debug-only visual aids: line segments and wireframe spheres. The driver
//! clears a [`Gizmos`] list every frame, the driver and the scene add
//! primitives to it, and [`GizmoRenderer`] draws the result as a line list
//! inside the scene pass.
//!
//! ## Usage
//!
//! ```
//! use cgmath::{Vector3, Vector4};
//! use lantern::gfx::gizmos::Gizmos;
//!
//! let mut gizmos = Gizmos::new();
//! gizmos.add_grid(10, Vector4::new(0.0, 0.0, 0.0, 1.0), Vector4::new(1.0, 1.0, 1.0, 1.0));
//! gizmos.add_sphere(Vector3::new(0.0, 2.0, 0.0), 0.2, 20, 20, Vector4::new(1.0, 1.0, 0.0, 1.0));
//! assert_eq!(gizmos.primitives().len(), 43);
//! ```

pub mod primitives;
pub mod renderer;

pub use primitives::{GizmoPrimitive, GizmoVertex, Gizmos};
pub use renderer::GizmoRenderer;
