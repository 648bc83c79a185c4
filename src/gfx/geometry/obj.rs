//! Wavefront OBJ import via `tobj`.

use std::path::Path;

use cgmath::{InnerSpace, Vector3};

use super::MeshData;
use crate::{
    error::{LanternError, Result},
    gfx::scene::Vertex,
};

/// Loads every model in an OBJ file as triangulated, single-index mesh data.
///
/// Materials are ignored. Models without normals get smooth normals
/// computed from their faces.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<MeshData>> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| LanternError::ObjLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let meshes: Vec<MeshData> = models
        .iter()
        .map(|model| mesh_data_from_tobj(&model.mesh))
        .filter(|data| !data.vertices.is_empty())
        .collect();

    if meshes.is_empty() {
        return Err(LanternError::EmptyModel(path.to_path_buf()));
    }

    log::info!(
        "loaded '{}': {} meshes, {} triangles",
        path.display(),
        meshes.len(),
        meshes.iter().map(MeshData::triangle_count).sum::<u32>()
    );
    Ok(meshes)
}

fn mesh_data_from_tobj(mesh: &tobj::Mesh) -> MeshData {
    let positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    let normals: Vec<[f32; 3]> = if mesh.normals.len() == mesh.positions.len() {
        mesh.normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect()
    } else {
        log::debug!("OBJ mesh has no normals, computing smooth normals");
        smooth_normals(&positions, &mesh.indices)
    };

    let tex_coords = |i: usize| -> [f32; 2] {
        match mesh.texcoords.get(i * 2..i * 2 + 2) {
            Some(uv) => [uv[0], uv[1]],
            None => [0.0, 0.0],
        }
    };

    let vertices = positions
        .iter()
        .zip(normals)
        .enumerate()
        .map(|(i, (position, normal))| Vertex::new(*position, normal, tex_coords(i)))
        .collect();

    MeshData::new(vertices, mesh.indices.clone())
}

/// Per-vertex normals averaged from adjacent faces, weighted by face area.
///
/// Vertices that touch no non-degenerate triangle get +Y.
pub fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vector3::new(0.0f32, 0.0, 0.0); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }

        let v0 = Vector3::from(positions[i0]);
        let v1 = Vector3::from(positions[i1]);
        let v2 = Vector3::from(positions[i2]);
        // cross product length is twice the area, which gives the weighting
        let face = (v1 - v0).cross(v2 - v0);

        sums[i0] += face;
        sums[i1] += face;
        sums[i2] += face;
    }

    sums.into_iter()
        .map(|sum| {
            if sum.magnitude2() > f32::EPSILON {
                sum.normalize().into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("lantern_{}_{}.obj", name, std::process::id()));
        std::fs::write(&path, contents).expect("write temp obj");
        path
    }

    #[test]
    fn test_smooth_normals_on_flat_quad() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, -1.0], [0.0, 0.0, -1.0]];
        let indices = [0, 1, 2, 2, 3, 0];
        for normal in smooth_normals(&positions, &indices) {
            assert!((normal[1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_smooth_normals_skip_bad_indices() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let normals = smooth_normals(&positions, &[0, 1, 7]);
        assert_eq!(normals, vec![[0.0, 1.0, 0.0]; 2]);
    }

    #[test]
    fn test_load_triangulates_and_computes_normals() {
        let path = write_temp(
            "quad",
            "o quad\nv 0 0 0\nv 1 0 0\nv 1 0 -1\nv 0 0 -1\nf 1 2 3 4\n",
        );
        let meshes = load_obj(&path).expect("quad loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].triangle_count(), 2);
        assert_eq!(meshes[0].vertex_count(), 4);
        for v in &meshes[0].vertices {
            assert!((v.normal[1] - 1.0).abs() < 1e-5);
            assert_eq!(v.position[3], 1.0);
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_obj("/definitely/not/here.obj");
        assert!(matches!(result, Err(LanternError::ObjLoad { .. })));
    }
}
