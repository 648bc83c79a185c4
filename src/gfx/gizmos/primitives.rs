//! Per-frame debug primitive list.

use cgmath::{InnerSpace, Vector3, Vector4};

/// A single debug shape, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoPrimitive {
    Line {
        start: Vector3<f32>,
        end: Vector3<f32>,
        colour: Vector4<f32>,
    },
    /// Wireframe sphere made of `rows` latitude bands and `columns` meridians.
    Sphere {
        center: Vector3<f32>,
        radius: f32,
        rows: u32,
        columns: u32,
        colour: Vector4<f32>,
    },
}

/// Vertex fed to the gizmo line pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GizmoVertex {
    pub position: [f32; 3],
    pub colour: [f32; 4],
}

impl GizmoVertex {
    fn new(position: Vector3<f32>, colour: Vector4<f32>) -> Self {
        Self {
            position: position.into(),
            colour: colour.into(),
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GizmoVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Debug shapes collected during one frame.
///
/// The driver clears the list at the start of every update; the driver and
/// the scene then add primitives, and the gizmo renderer turns them into a
/// line list.
#[derive(Debug, Default)]
pub struct Gizmos {
    primitives: Vec<GizmoPrimitive>,
}

impl Gizmos {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn add_line(&mut self, start: Vector3<f32>, end: Vector3<f32>, colour: Vector4<f32>) {
        self.primitives.push(GizmoPrimitive::Line { start, end, colour });
    }

    pub fn add_sphere(
        &mut self,
        center: Vector3<f32>,
        radius: f32,
        rows: u32,
        columns: u32,
        colour: Vector4<f32>,
    ) {
        self.primitives.push(GizmoPrimitive::Sphere {
            center,
            radius,
            rows,
            columns,
            colour,
        });
    }

    /// Adds a square floor grid on the XZ plane with `2 * half_extent + 1`
    /// lines in each direction, one unit apart. The centre lines use
    /// `axis_colour`.
    pub fn add_grid(&mut self, half_extent: i32, line_colour: Vector4<f32>, axis_colour: Vector4<f32>) {
        let extent = half_extent as f32;
        for i in -half_extent..=half_extent {
            let offset = i as f32;
            let colour = if i == 0 { axis_colour } else { line_colour };
            self.add_line(
                Vector3::new(offset, 0.0, extent),
                Vector3::new(offset, 0.0, -extent),
                colour,
            );
            self.add_line(
                Vector3::new(extent, 0.0, offset),
                Vector3::new(-extent, 0.0, offset),
                colour,
            );
        }
    }

    pub fn primitives(&self) -> &[GizmoPrimitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Flattens every primitive into line-list vertices (two per segment).
    pub fn line_vertices(&self) -> Vec<GizmoVertex> {
        let mut vertices = Vec::new();
        for primitive in &self.primitives {
            match *primitive {
                GizmoPrimitive::Line { start, end, colour } => {
                    vertices.push(GizmoVertex::new(start, colour));
                    vertices.push(GizmoVertex::new(end, colour));
                }
                GizmoPrimitive::Sphere {
                    center,
                    radius,
                    rows,
                    columns,
                    colour,
                } => push_sphere(&mut vertices, center, radius, rows, columns, colour),
            }
        }
        vertices
    }
}

fn sphere_point(center: Vector3<f32>, radius: f32, row: u32, rows: u32, column: u32, columns: u32) -> Vector3<f32> {
    let polar = std::f32::consts::PI * row as f32 / rows as f32;
    let azimuth = std::f32::consts::TAU * column as f32 / columns as f32;
    let direction = Vector3::new(polar.sin() * azimuth.cos(), polar.cos(), polar.sin() * azimuth.sin());
    center + direction.normalize() * radius
}

fn push_sphere(
    vertices: &mut Vec<GizmoVertex>,
    center: Vector3<f32>,
    radius: f32,
    rows: u32,
    columns: u32,
    colour: Vector4<f32>,
) {
    if rows < 2 || columns < 3 {
        return;
    }

    // latitude rings, skipping the poles
    for row in 1..rows {
        for column in 0..columns {
            let a = sphere_point(center, radius, row, rows, column, columns);
            let b = sphere_point(center, radius, row, rows, column + 1, columns);
            vertices.push(GizmoVertex::new(a, colour));
            vertices.push(GizmoVertex::new(b, colour));
        }
    }

    // meridians, pole to pole
    for column in 0..columns {
        for row in 0..rows {
            let a = sphere_point(center, radius, row, rows, column, columns);
            let b = sphere_point(center, radius, row + 1, rows, column, columns);
            vertices.push(GizmoVertex::new(a, colour));
            vertices.push(GizmoVertex::new(b, colour));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Vector4<f32> {
        Vector4::new(1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_clear_empties_list() {
        let mut gizmos = Gizmos::new();
        gizmos.add_line(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), white());
        assert!(!gizmos.is_empty());
        gizmos.clear();
        assert!(gizmos.is_empty());
        assert!(gizmos.line_vertices().is_empty());
    }

    #[test]
    fn test_grid_has_21_lines_each_way() {
        let mut gizmos = Gizmos::new();
        let black = Vector4::new(0.0, 0.0, 0.0, 1.0);
        gizmos.add_grid(10, black, white());

        assert_eq!(gizmos.primitives().len(), 42);
        let axis_lines = gizmos
            .primitives()
            .iter()
            .filter(|p| matches!(p, GizmoPrimitive::Line { colour, .. } if *colour == white()))
            .count();
        assert_eq!(axis_lines, 2);
    }

    #[test]
    fn test_sphere_segments_lie_on_surface() {
        let mut gizmos = Gizmos::new();
        let center = Vector3::new(1.0, -2.0, 0.5);
        gizmos.add_sphere(center, 0.2, 20, 20, white());

        let vertices = gizmos.line_vertices();
        // 19 rings of 20 segments plus 20 meridians of 20 segments
        assert_eq!(vertices.len(), 2 * (19 * 20 + 20 * 20));
        for vertex in vertices {
            let p = Vector3::from(vertex.position);
            assert!(((p - center).magnitude() - 0.2).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_sphere_emits_nothing() {
        let mut gizmos = Gizmos::new();
        gizmos.add_sphere(Vector3::new(0.0, 0.0, 0.0), 1.0, 1, 20, white());
        assert!(gizmos.line_vertices().is_empty());
    }

    #[test]
    fn test_line_vertices_keep_colour() {
        let mut gizmos = Gizmos::new();
        let red = Vector4::new(1.0, 0.0, 0.0, 1.0);
        gizmos.add_line(Vector3::new(0.0, 1.0, 2.0), Vector3::new(3.0, 4.0, 5.0), red);

        let vertices = gizmos.line_vertices();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0].position, [0.0, 1.0, 2.0]);
        assert_eq!(vertices[1].position, [3.0, 4.0, 5.0]);
        assert_eq!(vertices[1].colour, [1.0, 0.0, 0.0, 1.0]);
    }
}
