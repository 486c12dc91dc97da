use geo_clipper::{Clipper, EndType};

use crate::error::Result;

use super::backend::{join_type, paths_to_multi, usable_paths, FACTOR};
use super::path::{Orientation, Path};
use super::JoinStyle;

/// Default arc tolerance for round joins, in engine units (0.01 mm).
const DEFAULT_ARC_TOLERANCE: f64 = 10.0;

/// Grows (positive distance) or shrinks (negative distance) closed paths by a
/// uniform Euclidean distance.
///
/// The output may overlap itself where offsets of separate contours meet;
/// run it through [`Union`](super::Union) to resolve that.
#[derive(Debug, Clone)]
pub struct Offset {
    paths: Vec<Path>,
    distance: i64,
    join: JoinStyle,
    arc_tolerance: f64,
}

impl Offset {
    /// Creates an offset of role-oriented `paths` by `distance` engine units.
    #[must_use]
    pub fn new(paths: Vec<Path>, distance: i64) -> Self {
        Self {
            paths,
            distance,
            join: JoinStyle::default(),
            arc_tolerance: DEFAULT_ARC_TOLERANCE,
        }
    }

    /// Sets the corner join style.
    #[must_use]
    pub fn with_join(mut self, join: JoinStyle) -> Self {
        self.join = join;
        self
    }

    /// Sets the maximum chord deviation of round joins, in engine units.
    #[must_use]
    pub fn with_arc_tolerance(mut self, arc_tolerance: f64) -> Self {
        self.arc_tolerance = arc_tolerance;
        self
    }

    /// Executes the offset, returning role-oriented contours (filled
    /// clockwise, holes counter-clockwise).
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` leaves room for backend failures.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<Vec<Path>> {
        let paths = usable_paths(&self.paths);
        if paths.is_empty() || self.distance == 0 {
            return Ok(paths);
        }

        let grown = paths_to_multi(&paths).offset(
            self.distance as f64,
            join_type(self.join, self.arc_tolerance),
            EndType::ClosedPolygon,
            FACTOR,
        );

        let mut out = Vec::new();
        for polygon in &grown.0 {
            let outer = super::backend::ring_to_path(polygon.exterior());
            if let Ok(outer) = outer.validate() {
                out.push(outer.with_orientation(Orientation::Clockwise));
            }
            for ring in polygon.interiors() {
                if let Ok(hole) = super::backend::ring_to_path(ring).validate() {
                    out.push(hole.with_orientation(Orientation::CounterClockwise));
                }
            }
        }
        Ok(out)
    }
}
