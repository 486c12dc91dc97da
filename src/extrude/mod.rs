//! Extrusion of filled regions into closed triangle meshes.

mod mesh;
mod prism;

pub use mesh::TriangleMesh;
pub use prism::PrismExtruder;

use crate::error::Result;
use crate::shape::Region;

/// Turns 2D regions into a 3D solid.
pub trait Extruder {
    /// Extrudes `regions` straight up from `z = 0` to `z = depth`.
    ///
    /// # Errors
    ///
    /// Returns an error if `depth` is not positive or a region cannot be
    /// triangulated.
    fn extrude(&self, regions: &[Region], depth: f64) -> Result<TriangleMesh>;
}
