//! The intersection driver (§4.4): builds one kernel per mesh, runs the
//! pairwise query, and projects the result back to validated face-id sets.

use std::collections::HashSet;

use crate::error::Result;
use crate::kernel::SpatialKernel;
use crate::mesh::MeshInput;

/// The two sets of face ids that participate in the surface-surface
/// intersection between mesh A and mesh B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionResult {
    pub faces_a: HashSet<u32>,
    pub faces_b: HashSet<u32>,
}

/// Compute the surface-surface intersection between two meshes, each
/// already supplied with its own world transform and world-space bounding
/// box.
pub fn compute_intersection(mesh_a: &MeshInput, mesh_b: &MeshInput) -> Result<IntersectionResult> {
    let kernel_a = build_kernel(mesh_a, "A")?;
    let kernel_b = build_kernel(mesh_b, "B")?;

    let (raw_a, raw_b) = kernel_a.intersect(&kernel_b)?;

    Ok(IntersectionResult {
        faces_a: validate_faces(raw_a, mesh_a.polygon_count(), "A"),
        faces_b: validate_faces(raw_b, mesh_b.polygon_count(), "B"),
    })
}

fn build_kernel(mesh: &MeshInput, label: &'static str) -> Result<SpatialKernel> {
    let triangles = mesh.build_triangles();
    if triangles.is_empty() {
        tracing::debug!(mesh = label, "mesh has no triangles");
    }
    SpatialKernel::build_octree(mesh.world_bbox, triangles)
}

/// Drop any face id outside `[0, polygon_count)`, logging each drop rather
/// than failing the whole query.
fn validate_faces(raw: HashSet<u32>, polygon_count: usize, label: &'static str) -> HashSet<u32> {
    raw.into_iter()
        .filter(|&face_id| {
            let valid = (face_id as usize) < polygon_count;
            if !valid {
                tracing::warn!(
                    mesh = label,
                    face_id,
                    polygon_count,
                    "dropping out-of-range face id"
                );
            }
            valid
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{Aabb, Point3, Vector3};
    use crate::mesh::Polygon;
    use cgmath::SquareMatrix;

    fn cube_mesh(center: f64) -> MeshInput {
        // a single quad face on the -X... this is just enough geometry to
        // exercise the driver; full scenario tests live under tests/.
        let vertices = vec![
            Point3::new(center - 1.0, -1.0, -1.0),
            Point3::new(center - 1.0, 1.0, -1.0),
            Point3::new(center - 1.0, 1.0, 1.0),
            Point3::new(center - 1.0, -1.0, 1.0),
        ];
        MeshInput {
            vertices,
            polygons: vec![Polygon {
                normal: Vector3::new(-1.0, 0.0, 0.0),
                triangle_vertex_indices: vec![0, 1, 2, 0, 2, 3],
            }],
            world_transform: cgmath::Matrix4::identity(),
            world_bbox: Aabb::new(
                Point3::new(center - 1.0, -1.0, -1.0),
                Point3::new(center + 1.0, 1.0, 1.0),
            ),
        }
    }

    #[test]
    fn disjoint_meshes_yield_empty_result() {
        let a = cube_mesh(0.0);
        let b = cube_mesh(100.0);
        let result = compute_intersection(&a, &b).unwrap();
        assert!(result.faces_a.is_empty());
        assert!(result.faces_b.is_empty());
    }
}
