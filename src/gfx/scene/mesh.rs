//! GPU meshes with an initialize-once, draw-many contract.

use wgpu::util::DeviceExt;

use crate::gfx::rendering::draw_target::DrawTarget;

use super::vertex::{ScreenVertex, Vertex, VertexLayout};

/// Triangle count for a triangle list: from the indices when present,
/// otherwise from the vertices.
pub fn triangle_count(vertex_count: usize, index_count: Option<usize>) -> u32 {
    match index_count {
        Some(count) if count > 0 => (count / 3) as u32,
        _ => (vertex_count / 3) as u32,
    }
}

/// Two triangles forming a 1x1 quad on the XZ plane, facing +Y.
pub fn quad_vertices() -> [Vertex; 6] {
    let up = [0.0, 1.0, 0.0];
    [
        Vertex::new([-0.5, 0.0, 0.5], up, [0.0, 1.0]),
        Vertex::new([0.5, 0.0, 0.5], up, [1.0, 1.0]),
        Vertex::new([-0.5, 0.0, -0.5], up, [0.0, 0.0]),
        Vertex::new([-0.5, 0.0, -0.5], up, [0.0, 0.0]),
        Vertex::new([0.5, 0.0, 0.5], up, [1.0, 1.0]),
        Vertex::new([0.5, 0.0, -0.5], up, [1.0, 0.0]),
    ]
}

/// Two triangles covering clip space, `[-1, 1]` on both axes.
pub fn fullscreen_quad_vertices() -> [ScreenVertex; 6] {
    [
        ScreenVertex { position: [-1.0, 1.0] },
        ScreenVertex { position: [-1.0, -1.0] },
        ScreenVertex { position: [1.0, 1.0] },
        ScreenVertex { position: [-1.0, -1.0] },
        ScreenVertex { position: [1.0, -1.0] },
        ScreenVertex { position: [1.0, 1.0] },
    ]
}

/// Buffers and counts needed to replay a mesh draw on the GPU.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub layout: VertexLayout,
    /// Vertices (non-indexed) or indices (indexed) to draw.
    pub element_count: u32,
}

/// A triangle mesh owning its vertex and optional index buffer.
///
/// Buffers are created by one of the `initialize*` methods, exactly once.
/// A mesh that was never initialized holds no GPU handles and is safe to
/// drop or submit; GPU targets skip it.
#[derive(Debug)]
pub struct Mesh {
    label: String,
    layout: VertexLayout,
    triangle_count: u32,
    initialized: bool,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
}

impl Mesh {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            layout: VertexLayout::Standard,
            triangle_count: 0,
            initialized: false,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    /// Uploads `vertices` and, when given, `indices`.
    ///
    /// # Panics
    /// Panics if the mesh is already initialized.
    pub fn initialize(&mut self, device: &wgpu::Device, vertices: &[Vertex], indices: Option<&[u32]>) {
        self.upload(device, VertexLayout::Standard, vertices, indices);
    }

    /// Initializes as the unit XZ quad from [`quad_vertices`].
    ///
    /// # Panics
    /// Panics if the mesh is already initialized.
    pub fn initialize_quad(&mut self, device: &wgpu::Device) {
        self.upload(device, VertexLayout::Standard, &quad_vertices(), None);
    }

    /// Initializes as the clip-space quad used by post-processing.
    ///
    /// # Panics
    /// Panics if the mesh is already initialized.
    pub fn initialize_fullscreen_quad(&mut self, device: &wgpu::Device) {
        self.upload(device, VertexLayout::Screen, &fullscreen_quad_vertices(), None);
    }

    fn upload<V: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        layout: VertexLayout,
        vertices: &[V],
        indices: Option<&[u32]>,
    ) {
        let indices = indices.filter(|indices| !indices.is_empty());
        self.claim(layout, triangle_count(vertices.len(), indices.map(<[u32]>::len)));

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", self.label)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = indices.map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", self.label)),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        log::debug!(
            "mesh '{}' initialized: {} triangles, indexed: {}",
            self.label,
            self.triangle_count,
            self.index_buffer.is_some()
        );
    }

    /// Marks the mesh initialized with its layout and triangle count.
    fn claim(&mut self, layout: VertexLayout, triangle_count: u32) {
        assert!(
            !self.initialized,
            "mesh '{}' is already initialized",
            self.label
        );
        self.initialized = true;
        self.layout = layout;
        self.triangle_count = triangle_count;
    }

    /// Submits this mesh to `target`.
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_mesh(self);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }

    /// GPU handles for replaying this mesh, or `None` before initialization.
    pub fn buffers(&self) -> Option<MeshBuffers> {
        let vertex_buffer = self.vertex_buffer.clone()?;
        Some(MeshBuffers {
            vertex_buffer,
            index_buffer: self.index_buffer.clone(),
            layout: self.layout,
            element_count: self.triangle_count * 3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::rendering::draw_target::{DrawCommand, DrawLog};

    #[test]
    fn test_triangle_count_prefers_indices() {
        assert_eq!(triangle_count(8, Some(36)), 12);
        assert_eq!(triangle_count(6, None), 2);
        // an empty index list counts as no indices
        assert_eq!(triangle_count(9, Some(0)), 3);
        assert_eq!(triangle_count(7, None), 2);
    }

    #[test]
    fn test_quad_faces_up_with_unit_extent() {
        let vertices = quad_vertices();
        assert_eq!(triangle_count(vertices.len(), None), 2);
        for v in &vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0, 0.0]);
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.position[0].abs(), 0.5);
            assert_eq!(v.position[2].abs(), 0.5);
            assert!(v.tex_coord.iter().all(|t| (0.0..=1.0).contains(t)));
        }

        // counter-clockwise seen from above
        let [a, b, c] = [vertices[0].position, vertices[1].position, vertices[2].position];
        let e1 = [b[0] - a[0], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[2] - a[2]];
        let normal_y = e1[1] * e2[0] - e1[0] * e2[1];
        assert!(normal_y > 0.0);
    }

    #[test]
    fn test_fullscreen_quad_spans_clip_space() {
        let vertices = fullscreen_quad_vertices();
        assert_eq!(vertices.len(), 6);
        for corner in [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]] {
            assert!(vertices.iter().any(|v| v.position == corner));
        }
    }

    #[test]
    fn test_uninitialized_mesh_is_inert() {
        let mesh = Mesh::new("empty");
        assert!(!mesh.is_initialized());
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.buffers().is_none());
    }

    #[test]
    fn test_claim_records_layout_and_count() {
        let mut mesh = Mesh::new("screen");
        mesh.claim(VertexLayout::Screen, 2);
        assert!(mesh.is_initialized());
        assert_eq!(mesh.layout(), VertexLayout::Screen);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    #[should_panic(expected = "already initialized")]
    fn test_reinitialization_panics() {
        let mut mesh = Mesh::new("twice");
        mesh.claim(VertexLayout::Standard, 12);
        mesh.claim(VertexLayout::Standard, 12);
    }

    #[test]
    fn test_draw_submits_to_target() {
        let mesh = Mesh::new("cube");
        let mut log = DrawLog::new();
        mesh.draw(&mut log);

        assert_eq!(log.commands().len(), 1);
        match &log.commands()[0] {
            DrawCommand::DrawMesh { mesh, triangles, indexed } => {
                assert_eq!(mesh, "cube");
                assert_eq!(*triangles, 0);
                assert!(!indexed);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
