use cgmath::{Point3, Vector3};

use super::aabb::Aabb;

/// A single triangle produced by fan-triangulating one polygon of a source
/// mesh, with vertices already carried into world space.
///
/// Unlike the teacher's `Triangle<T>` (which stores indices plus a raw
/// pointer into a shared vertex buffer, valid only as long as that buffer
/// outlives it), this version owns its three vertices directly: triangles
/// here are produced once per query and must not alias a mesh's backing
/// storage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    /// Id of the polygon in the source mesh that produced this triangle.
    pub face_id: u32,
    /// Which sub-triangle of the polygon's fan triangulation this is.
    pub triangle_index: u32,
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
    /// The polygon's normal (not necessarily this sub-triangle's own
    /// normal), in world space.
    pub normal: Vector3<f64>,
}

impl Triangle {
    pub fn new(
        face_id: u32,
        triangle_index: u32,
        v0: Point3<f64>,
        v1: Point3<f64>,
        v2: Point3<f64>,
        normal: Vector3<f64>,
    ) -> Self {
        Self {
            face_id,
            triangle_index,
            v0,
            v1,
            v2,
            normal,
        }
    }

    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn centroid(&self) -> Point3<f64> {
        Point3::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
            (self.v0.z + self.v1.z + self.v2.z) / 3.0,
        )
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::from_points(&self.vertices()).expect("triangle always has 3 vertices")
    }

    /// Unique key within a single mesh's triangle soup, used to deduplicate
    /// triangles that were inserted into more than one octree node.
    pub fn key(&self) -> (u32, u32) {
        (self.face_id, self.triangle_index)
    }
}
