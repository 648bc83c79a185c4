//! # Vertex Data Structures
//!
//! GPU-compatible vertex formats. Scene meshes use [`Vertex`]; the
//! fullscreen quad used by post-processing uses [`ScreenVertex`].

/// A lit-mesh vertex: homogeneous position, normal and texture coordinate.
///
/// `#[repr(C)]` keeps the 40-byte layout that [`Vertex::desc`] describes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position `[x, y, z, 1]`
    pub position: [f32; 4],
    /// Normal `[nx, ny, nz, 0]`
    pub normal: [f32; 4],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position: [position[0], position[1], position[2], 1.0],
            normal: [normal[0], normal[1], normal[2], 0.0],
            tex_coord,
        }
    }

    /// Vertex buffer layout:
    /// - location 0: position (Float32x4)
    /// - location 1: normal (Float32x4)
    /// - location 2: tex_coord (Float32x2)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4, 2 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Screen-space vertex for fullscreen passes; positions are in NDC.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenVertex {
    pub position: [f32; 2],
}

impl ScreenVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ScreenVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Which vertex format a mesh stores and a program consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexLayout {
    #[default]
    Standard,
    Screen,
}

impl VertexLayout {
    pub fn buffer_layout(self) -> wgpu::VertexBufferLayout<'static> {
        match self {
            VertexLayout::Standard => Vertex::desc(),
            VertexLayout::Screen => ScreenVertex::desc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_sizes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        assert_eq!(std::mem::size_of::<ScreenVertex>(), 8);
        assert_eq!(VertexLayout::Standard.buffer_layout().array_stride, 40);
        assert_eq!(VertexLayout::Screen.buffer_layout().array_stride, 8);
    }

    #[test]
    fn test_new_fills_homogeneous_w() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5]);
        assert_eq!(v.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(v.normal, [0.0, 1.0, 0.0, 0.0]);
    }
}
