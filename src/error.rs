//! Error types for the surface-intersection pipeline.

/// All error conditions the kernel and driver can fail with.
///
/// Most anomalies (an empty mesh, a triangle with a face id outside the
/// polygon count) are not modeled here because they are not failures: they
/// are logged via `tracing` and otherwise absorbed, per the error handling
/// design.
#[derive(thiserror::Error, Debug)]
pub enum IntersectionError {
    /// The supplied enclosing bounding box is empty or inverted on some axis.
    #[error("degenerate bounding box on axis {axis}")]
    DegenerateBBox {
        /// Which axis (0 = x, 1 = y, 2 = z) failed `min <= max`.
        axis: u8,
    },

    /// A kernel-vs-kernel query was attempted between incompatible spatial
    /// kernel variants.
    #[error("incompatible spatial kernel variants")]
    IncompatibleKernel,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IntersectionError>;
