use crate::math::polygon_2d::{signed_area, to_ccw, to_cw};
use crate::math::Point2;

/// One connected filled area: an outer boundary plus its direct holes.
///
/// Coordinates are millimetres. The outer boundary winds counter-clockwise
/// and every hole clockwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl Region {
    /// Creates a region, normalizing the winding of every boundary.
    #[must_use]
    pub fn new(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Self {
        Self {
            outer: to_ccw(outer),
            holes: holes.into_iter().map(to_cw).collect(),
        }
    }

    /// Filled area in square millimetres.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area(&self.outer).abs()
            - self
                .holes
                .iter()
                .map(|h| signed_area(h).abs())
                .sum::<f64>()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::is_ccw;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
        ]
    }

    #[test]
    fn new_normalizes_winding() {
        let mut outer = square(0.0, 0.0, 10.0);
        outer.reverse();
        let region = Region::new(outer, vec![square(2.0, 2.0, 2.0)]);
        assert!(is_ccw(&region.outer));
        assert!(signed_area(&region.holes[0]) < 0.0);
        assert!((region.area() - 96.0).abs() < 1e-9);
    }
}
