use geo_clipper::Clipper;

use crate::error::Result;

use super::backend::{multi_to_tree, paths_to_multi, usable_paths, FACTOR};
use super::path::Path;
use super::tree::PolygonTree;

/// Subtracts a clip region from a subject region.
///
/// Both sides are interpreted with the non-zero fill rule, so contours must
/// carry role orientation (filled clockwise, holes counter-clockwise).
#[derive(Debug, Clone)]
pub struct Difference {
    subject: Vec<Path>,
    clip: Vec<Path>,
}

impl Difference {
    /// Creates a new `Difference` operation.
    #[must_use]
    pub fn new(subject: Vec<Path>, clip: Vec<Path>) -> Self {
        Self { subject, clip }
    }

    /// Executes the difference.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for backend failures.
    pub fn execute(&self) -> Result<PolygonTree> {
        let subject = usable_paths(&self.subject);
        if subject.is_empty() {
            return Ok(PolygonTree::new());
        }
        let clip = usable_paths(&self.clip);
        let result = paths_to_multi(&subject).difference(&paths_to_multi(&clip), FACTOR);
        Ok(multi_to_tree(&result))
    }
}
