//! Geometry primitives: points, vectors and matrices are `cgmath` types used
//! directly; this module adds the axis-aligned bounding box, the triangle
//! record, and the intersection predicates built on top of them.

mod aabb;
mod predicates;
mod triangle;

pub use aabb::Aabb;
pub use predicates::{aabb_intersects_triangle, coplanar_epsilon, triangles_intersect};
pub use triangle::Triangle;

pub use cgmath::{Matrix4, Point3, Vector3};
