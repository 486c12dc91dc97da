use crate::config::SCALE;
use crate::error::PolygonError;
use crate::math::Point2;

/// A point in the polygon engine's integer coordinate space.
///
/// One unit is `1 / SCALE` millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Scales a millimetre coordinate into engine space.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(p: &Point2) -> Self {
        Self::new((p.x * SCALE).round() as i64, (p.y * SCALE).round() as i64)
    }

    /// Converts back to millimetres.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> Point2 {
        Point2::new(self.x as f64 / SCALE, self.y as f64 / SCALE)
    }
}

/// Winding direction of a closed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    /// Zero enclosed area.
    Degenerate,
}

/// Where a point lies relative to a closed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    Outside,
    OnBoundary,
}

/// A closed polygon in engine space.
///
/// The closing point is never stored and consecutive duplicates are removed
/// on construction. Orientation carries meaning: filled contours run
/// clockwise, holes counter-clockwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    points: Vec<IntPoint>,
}

impl Path {
    /// Creates a path, dropping the duplicated closing point and repeated vertices.
    #[must_use]
    pub fn new(mut points: Vec<IntPoint>) -> Self {
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// Scales millimetre coordinates into a path.
    #[must_use]
    pub fn from_points_f64(points: &[Point2]) -> Self {
        Self::new(points.iter().map(IntPoint::from_f64).collect())
    }

    /// Returns the vertices in millimetres.
    #[must_use]
    pub fn to_points_f64(&self) -> Vec<Point2> {
        self.points.iter().map(|p| p.to_f64()).collect()
    }

    #[must_use]
    pub fn points(&self) -> &[IntPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Twice the signed area, exact. Positive for counter-clockwise.
    #[must_use]
    pub fn signed_area2(&self) -> i128 {
        let n = self.points.len();
        if n < 3 {
            return 0;
        }
        let mut sum: i128 = 0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += i128::from(a.x) * i128::from(b.y) - i128::from(b.x) * i128::from(a.y);
        }
        sum
    }

    /// Signed area in square millimetres.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn area(&self) -> f64 {
        self.signed_area2() as f64 * 0.5 / (SCALE * SCALE)
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        match self.signed_area2().signum() {
            1 => Orientation::CounterClockwise,
            -1 => Orientation::Clockwise,
            _ => Orientation::Degenerate,
        }
    }

    /// Returns the path with vertex order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Returns the path wound in `orientation`, reversing it if needed.
    ///
    /// Degenerate paths are returned unchanged.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        let current = self.orientation();
        if current != Orientation::Degenerate
            && orientation != Orientation::Degenerate
            && current != orientation
        {
            self.points.reverse();
        }
        self
    }

    /// Checks that the path encloses area with at least three vertices.
    ///
    /// # Errors
    ///
    /// Returns [`PolygonError::DegenerateInput`] otherwise.
    pub fn validate(self) -> Result<Self, PolygonError> {
        if self.points.len() < 3 || self.orientation() == Orientation::Degenerate {
            return Err(PolygonError::DegenerateInput {
                points: self.points.len(),
            });
        }
        Ok(self)
    }

    /// Returns the path shifted by `(dx, dy)` engine units.
    #[must_use]
    pub fn translated(&self, dx: i64, dy: i64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| IntPoint::new(p.x + dx, p.y + dy))
                .collect(),
        }
    }

    /// Classifies `p` against this path using exact integer arithmetic.
    #[must_use]
    pub fn locate(&self, p: IntPoint) -> PointLocation {
        let n = self.points.len();
        if n < 3 {
            return PointLocation::Outside;
        }
        let px = i128::from(p.x);
        let py = i128::from(p.y);
        let mut inside = false;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let (ax, ay) = (i128::from(a.x), i128::from(a.y));
            let (bx, by) = (i128::from(b.x), i128::from(b.y));

            let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
            if cross == 0
                && px >= ax.min(bx)
                && px <= ax.max(bx)
                && py >= ay.min(by)
                && py <= ay.max(by)
            {
                return PointLocation::OnBoundary;
            }

            if (ay > py) != (by > py) {
                // p.x < intersection x, rearranged to avoid division
                let lhs = (px - ax) * (by - ay);
                let rhs = (py - ay) * (bx - ax);
                let left_of_crossing = if by > ay { lhs < rhs } else { lhs > rhs };
                if left_of_crossing {
                    inside = !inside;
                }
            }
        }
        if inside {
            PointLocation::Inside
        } else {
            PointLocation::Outside
        }
    }

    /// Returns `true` if `other` lies inside this path.
    ///
    /// Vertices of `other` on this path's boundary are inconclusive and skipped;
    /// a path entirely on the boundary is not enclosed.
    #[must_use]
    pub fn encloses(&self, other: &Path) -> bool {
        for &p in &other.points {
            match self.locate(p) {
                PointLocation::Inside => return true,
                PointLocation::Outside => return false,
                PointLocation::OnBoundary => {}
            }
        }
        false
    }
}
