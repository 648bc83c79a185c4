//! # Geometry
//!
//! CPU-side mesh data: procedural primitives and OBJ import. Everything here
//! produces [`MeshData`] in the [`Vertex`] layout, ready for
//! [`Mesh::initialize`].
//!
//! ```no_run
//! use lantern::gfx::geometry::{generate_sphere, unit_cube};
//!
//! let cube = unit_cube();
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let sphere = generate_sphere(32, 16);
//! ```

pub mod obj;
pub mod primitives;

pub use obj::{load_obj, smooth_normals};
pub use primitives::*;

use crate::gfx::scene::{mesh::triangle_count, Mesh, Vertex};

/// Vertex and index data for one mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    /// Triangle list indices; empty for non-indexed data.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> u32 {
        triangle_count(self.vertices.len(), Some(self.indices.len()))
    }

    /// Uploads into a new [`Mesh`].
    pub fn to_mesh(&self, device: &wgpu::Device, label: &str) -> Mesh {
        let mut mesh = Mesh::new(label);
        let indices = (!self.indices.is_empty()).then_some(self.indices.as_slice());
        mesh.initialize(device, &self.vertices, indices);
        mesh
    }
}
