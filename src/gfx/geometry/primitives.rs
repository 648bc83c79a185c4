//! # Primitive Shape Generation
//!
//! Procedural shapes, Y-up, counter-clockwise front faces.

use std::f32::consts::PI;

use super::{obj::smooth_normals, MeshData};
use crate::gfx::scene::Vertex;

/// A unit cube centered at the origin with flat-shaded faces.
///
/// Each face has its own four vertices so normals point straight out and
/// UVs span 0..1 per face.
pub fn generate_cube() -> MeshData {
    // (normal, four corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]]),
        ([0.0, 0.0, -1.0], [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]]),
        ([-1.0, 0.0, 0.0], [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]]),
        ([1.0, 0.0, 0.0], [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]]),
        ([0.0, 1.0, 0.0], [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]]),
        ([0.0, -1.0, 0.0], [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]]),
    ];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut data = MeshData::default();
    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            data.vertices.push(Vertex::new(*corner, normal, uv));
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    data
}

/// The 8-vertex, 36-index cube with smooth corner normals.
pub fn unit_cube() -> MeshData {
    let positions: [[f32; 3]; 8] = [
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [-0.5, 0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, -0.5],
        [0.5, 0.5, -0.5],
    ];
    let indices = vec![
        2, 1, 0, 3, 1, 2, 4, 5, 6, 5, 7, 6, 2, 6, 3, 6, 7, 3, 4, 6, 0, 6, 2, 0, 5, 4, 0, 5, 0, 1,
        7, 5, 1, 1, 3, 7,
    ];

    let normals = smooth_normals(&positions, &indices);
    let vertices = positions
        .iter()
        .zip(normals)
        .map(|(position, normal)| Vertex::new(*position, normal, [0.0, 0.0]))
        .collect();
    MeshData::new(vertices, indices)
}

/// A UV sphere of radius 1 centered at the origin.
///
/// # Arguments
/// * `longitude_segments` - Vertical slices (at least 3)
/// * `latitude_segments` - Horizontal bands (at least 2)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> MeshData {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);
    let mut data = MeshData::default();

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let p = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            let uv = [long as f32 / long_segs as f32, lat as f32 / lat_segs as f32];
            data.vertices.push(Vertex::new(p, p, uv));
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;
            // the pole rows collapse to a point, so each pole band is one triangle wide
            if lat != 0 {
                data.indices.extend_from_slice(&[first, first + 1, second]);
            }
            if lat != lat_segs - 1 {
                data.indices.extend_from_slice(&[second, first + 1, second + 1]);
            }
        }
    }
    data
}

/// A flat plane on XZ facing +Y, centered at the origin.
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `width_segments`, `depth_segments` - Subdivisions (at least 1)
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> MeshData {
    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);
    let mut data = MeshData::default();

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            data.vertices.push(Vertex::new(
                [(u - 0.5) * width, 0.0, (v - 0.5) * depth],
                [0.0, 1.0, 0.0],
                [u, v],
            ));
        }
    }

    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;
            data.indices
                .extend_from_slice(&[i, next_row, i + 1, next_row, next_row + 1, i + 1]);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn v3(p: [f32; 4]) -> Vector3<f32> {
        Vector3::new(p[0], p[1], p[2])
    }

    /// Every triangle's winding normal must agree with its vertex normals.
    fn assert_outward_winding(data: &MeshData) {
        for tri in data.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| data.vertices[i as usize]);
            let face = (v3(b.position) - v3(a.position)).cross(v3(c.position) - v3(a.position));
            if face.magnitude() < 1e-9 {
                continue;
            }
            let normal = v3(a.normal) + v3(b.normal) + v3(c.normal);
            assert!(face.dot(normal) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_unit_cube_matches_indexed_layout() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);
        for v in &cube.vertices {
            let n = v3(v.normal);
            assert!((n.magnitude() - 1.0).abs() < 1e-5);
            // corner normals point away from the center
            assert!(n.dot(v3(v.position)) > 0.0);
        }
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        // two triangles per quad, one per quad in the pole bands
        assert_eq!(sphere.triangle_count(), 8 * (6 * 2 - 2));
        for v in &sphere.vertices {
            assert!((v3(v.position).magnitude() - 1.0).abs() < 1e-5);
        }
        assert_outward_winding(&sphere);
    }

    #[test]
    fn test_sphere_has_no_pole_slivers() {
        let sphere = generate_sphere(32, 16);
        for tri in sphere.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| v3(sphere.vertices[i as usize].position));
            let area = (b - a).cross(c - a).magnitude() * 0.5;
            assert!(area > 1e-4, "triangle {:?} has area {}", tri, area);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertex_count(), 9);
        assert_eq!(plane.indices.len(), 24);
        assert!(plane.vertices.iter().all(|v| v.position[1] == 0.0));
        assert_outward_winding(&plane);
    }
}
