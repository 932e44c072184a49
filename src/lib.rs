//! Computes, for two triangulated surface meshes sharing a coordinate
//! frame, the faces on each mesh that participate in a surface-surface
//! intersection.
//!
//! The crate has three layers: geometry primitives (`geometry`), the
//! spatial-division intersection kernel (`kernel`), and the intersection
//! driver (`driver`) that ties two kernels together given a pair of
//! [`mesh::MeshInput`] values. See `SPEC_FULL.md` and `DESIGN.md` in the
//! repository root for the full design.

pub mod driver;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod mesh;

pub use driver::{compute_intersection, IntersectionResult};
pub use error::{IntersectionError, Result};
pub use mesh::{MeshInput, Polygon};
