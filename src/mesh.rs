//! The external interface (§6): the shape of the data a host collaborator
//! supplies to describe one triangulated mesh for a single intersection
//! query. No files, network, or environment variables are touched here —
//! the host has already done whatever loading it needed.

use cgmath::{Matrix4, Point3, Transform, Vector3};
use itertools::Itertools;

use crate::geometry::{Aabb, Triangle};

/// One polygon's fan triangulation plus its object-space normal.
///
/// `triangle_vertex_indices` is a flat buffer, 3 entries per sub-triangle,
/// indexing into the mesh's shared vertex array — the same flat-index
/// shape the teacher's `get_mesh_data` chunks with `itertools::tuples()`.
pub struct Polygon {
    pub normal: Vector3<f64>,
    pub triangle_vertex_indices: Vec<u32>,
}

impl Polygon {
    pub fn triangle_count(&self) -> usize {
        self.triangle_vertex_indices.len() / 3
    }
}

/// Everything needed to describe one mesh for a single intersection query.
pub struct MeshInput {
    pub vertices: Vec<Point3<f64>>,
    pub polygons: Vec<Polygon>,
    pub world_transform: Matrix4<f64>,
    pub world_bbox: Aabb,
}

impl MeshInput {
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Expand every polygon's fan triangulation into world-space `Triangle`
    /// records. Vertices get the full world transform; normals get only
    /// its linear (rotation) part, per the normal-transform decision in
    /// `DESIGN.md` — `cgmath`'s `Transform::transform_vector` already does
    /// exactly this for an affine `Matrix4`.
    pub fn build_triangles(&self) -> Vec<Triangle> {
        let mut out = Vec::new();
        for (face_id, polygon) in self.polygons.iter().enumerate() {
            let world_normal = self.world_transform.transform_vector(polygon.normal);
            for (triangle_index, (i0, i1, i2)) in polygon
                .triangle_vertex_indices
                .iter()
                .copied()
                .tuples()
                .enumerate()
            {
                let v0 = self.world_transform.transform_point(self.vertices[i0 as usize]);
                let v1 = self.world_transform.transform_point(self.vertices[i1 as usize]);
                let v2 = self.world_transform.transform_point(self.vertices[i2 as usize]);
                out.push(Triangle::new(
                    face_id as u32,
                    triangle_index as u32,
                    v0,
                    v1,
                    v2,
                    world_normal,
                ));
            }
        }
        out
    }
}
