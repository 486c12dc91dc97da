use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the polygon winds counter-clockwise.
#[must_use]
pub fn is_ccw(points: &[Point2]) -> bool {
    signed_area(points) > TOLERANCE
}

/// Returns the polygon wound counter-clockwise, reversing it if needed.
#[must_use]
pub fn to_ccw(mut points: Vec<Point2>) -> Vec<Point2> {
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    points
}

/// Returns the polygon wound clockwise, reversing it if needed.
#[must_use]
pub fn to_cw(mut points: Vec<Point2>) -> Vec<Point2> {
    if signed_area(&points) > 0.0 {
        points.reverse();
    }
    points
}

/// Even-odd point-in-polygon test. Points on the boundary may report either way.
#[must_use]
pub fn contains_point(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
