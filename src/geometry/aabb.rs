use cgmath::{EuclideanSpace, InnerSpace, Point3};

use super::triangle::Triangle;

/// An axis-aligned bounding box, stored as its min and max corners.
///
/// `min.x <= max.x`, `min.y <= max.y`, `min.z <= max.z` must hold; this is
/// checked where it matters (mesh input validation) rather than enforced by
/// the type itself, mirroring the teacher's `Aabb`/`Obb` pair which also
/// stores corners/extents directly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Bounding box of a point cloud. Returns `None` for an empty slice.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let mut iter = points.iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), &p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });
        Some(Self { min, max })
    }

    pub fn center(&self) -> Point3<f64> {
        EuclideanSpace::midpoint(self.min, self.max)
    }

    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).magnitude()
    }

    /// Axis `i`: 0 = x, 1 = y, 2 = z. Returns `true` iff `min.i <= max.i`.
    pub fn is_axis_valid(&self, axis: usize) -> bool {
        match axis {
            0 => self.min.x <= self.max.x,
            1 => self.min.y <= self.max.y,
            2 => self.min.z <= self.max.z,
            _ => unreachable!("axis out of range"),
        }
    }

    /// Returns the first axis (0/1/2) on which the box is inverted or empty,
    /// or `None` if the box is well-formed.
    pub fn degenerate_axis(&self) -> Option<u8> {
        (0..3u8).find(|&axis| !self.is_axis_valid(axis as usize))
    }

    /// Classical half-open interval overlap on all three axes; touching
    /// boxes (shared face) count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn contains_any_vertex(&self, tri: &Triangle) -> bool {
        tri.vertices()
            .iter()
            .any(|&v| self.contains_point(v))
    }

    pub fn contains_all_vertices(&self, tri: &Triangle) -> bool {
        tri.vertices()
            .iter()
            .all(|&v| self.contains_point(v))
    }

    /// Subdivide into one of 8 octants around `self.center()`. The octant
    /// index's bits select which half of each axis is kept: bit 0 -> x, bit
    /// 1 -> y, bit 2 -> z. Mirrors the teacher octree's bit-indexed
    /// `create_children` layout.
    pub fn octant(&self, index: u8) -> Aabb {
        debug_assert!(index < 8);
        let c = self.center();
        let (min_x, max_x) = if index & 1 == 0 {
            (self.min.x, c.x)
        } else {
            (c.x, self.max.x)
        };
        let (min_y, max_y) = if index & 2 == 0 {
            (self.min.y, c.y)
        } else {
            (c.y, self.max.y)
        };
        let (min_z, max_z) = if index & 4 == 0 {
            (self.min.z, c.z)
        } else {
            (c.z, self.max.z)
        };
        Aabb::new(
            Point3::new(min_x, min_y, min_z),
            Point3::new(max_x, max_y, max_z),
        )
    }
}
