use geo::MultiPolygon;
use geo_clipper::Clipper;

use crate::error::Result;

use super::backend::{multi_to_tree, paths_to_multi, usable_paths, FACTOR};
use super::path::{Orientation, Path};
use super::tree::PolygonTree;

/// Merges paths into one region under the non-zero fill rule.
///
/// Overlapping same-sense contours coalesce; a counter-clockwise contour
/// inside a clockwise one cuts a hole. Degenerate paths are skipped.
#[derive(Debug, Clone)]
pub struct Union {
    paths: Vec<Path>,
}

impl Union {
    /// Creates a union of contours whose orientation already encodes their
    /// role (filled clockwise, holes counter-clockwise).
    #[must_use]
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// Creates a union of independent filled shapes, forcing every path
    /// clockwise first.
    #[must_use]
    pub fn filled(paths: Vec<Path>) -> Self {
        Self {
            paths: paths
                .into_iter()
                .map(|p| p.with_orientation(Orientation::Clockwise))
                .collect(),
        }
    }

    /// Executes the union.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for backend failures.
    pub fn execute(&self) -> Result<PolygonTree> {
        let paths = usable_paths(&self.paths);
        if paths.is_empty() {
            return Ok(PolygonTree::new());
        }
        let subject = paths_to_multi(&paths);
        let merged = subject.union(&MultiPolygon::<f64>::new(vec![]), FACTOR);
        Ok(multi_to_tree(&merged))
    }
}
