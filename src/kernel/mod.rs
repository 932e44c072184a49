//! The spatial-division intersection kernel: an octree over one mesh's
//! triangle soup, plus the dual-tree traversal that pairs two kernels.

mod octree;
mod traversal;

pub use octree::{OctreeKernel, OctreeNode, MAX_DEPTH, MAX_TRIANGLES_PER_NODE};

use std::collections::HashSet;

use crate::error::{IntersectionError, Result};
use crate::geometry::{Aabb, Triangle};

/// A spatial-division kernel over one mesh's triangle soup.
///
/// Represented as a tagged sum type rather than a trait object: today
/// there is a single variant (`Octree`), so an eventual second spatial
/// index is a variant addition, and `IncompatibleKernel` already exists as
/// a (currently unreachable) match arm rather than a dynamic type check.
pub enum SpatialKernel {
    Octree(OctreeKernel),
}

impl SpatialKernel {
    pub fn build_octree(bbox: Aabb, triangles: impl IntoIterator<Item = Triangle>) -> Result<Self> {
        Ok(Self::Octree(OctreeKernel::build(bbox, triangles)?))
    }

    pub fn bbox(&self) -> &Aabb {
        match self {
            Self::Octree(k) => k.bbox(),
        }
    }

    /// Query this kernel against `other`, returning the face ids of this
    /// mesh and of `other`'s mesh that participate in an intersection.
    pub fn intersect(&self, other: &SpatialKernel) -> Result<(HashSet<u32>, HashSet<u32>)> {
        match (self, other) {
            (Self::Octree(a), Self::Octree(b)) => {
                let eps = a.eps().max(b.eps());
                Ok(traversal::query(a.root(), b.root(), eps))
            }
            #[allow(unreachable_patterns)]
            _ => Err(IntersectionError::IncompatibleKernel),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{Point3, Vector3};

    fn world_bbox() -> Aabb {
        Aabb::new(Point3::new(-5.0, -5.0, -5.0), Point3::new(5.0, 5.0, 5.0))
    }

    #[test]
    fn empty_kernels_intersect_to_empty_sets() {
        let a = SpatialKernel::build_octree(world_bbox(), std::iter::empty()).unwrap();
        let b = SpatialKernel::build_octree(world_bbox(), std::iter::empty()).unwrap();
        let (faces_a, faces_b) = a.intersect(&b).unwrap();
        assert!(faces_a.is_empty());
        assert!(faces_b.is_empty());
    }

    #[test]
    fn single_overlapping_triangle_pair_is_found() {
        let t1 = Triangle::new(
            0,
            0,
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        let t2 = Triangle::new(
            1,
            0,
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 2.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        );
        let a = SpatialKernel::build_octree(world_bbox(), vec![t1]).unwrap();
        let b = SpatialKernel::build_octree(world_bbox(), vec![t2]).unwrap();
        let (faces_a, faces_b) = a.intersect(&b).unwrap();
        assert!(faces_a.contains(&0));
        assert!(faces_b.contains(&1));
    }
}
