//! Flattened primitive contours, counter-clockwise, in millimetres.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::config::BuildConfig;
use crate::math::Point2;

/// Full circle around `center`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn circle(center: Point2, radius: f64, config: &BuildConfig) -> Vec<Point2> {
    let n = config.circle_segments(radius);
    (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64;
            Point2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect()
}

/// Axis-aligned rectangle.
#[must_use]
pub fn rect(min: Point2, max: Point2) -> Vec<Point2> {
    vec![
        min,
        Point2::new(max.x, min.y),
        max,
        Point2::new(min.x, max.y),
    ]
}

/// Axis-aligned rectangle with circular corners.
///
/// The radius is clamped to half the shorter side; a non-positive radius
/// gives a plain rectangle.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rounded_rect(min: Point2, max: Point2, radius: f64, config: &BuildConfig) -> Vec<Point2> {
    let half_short = 0.5 * (max.x - min.x).min(max.y - min.y);
    let r = radius.min(half_short);
    if r <= 0.0 {
        return rect(min, max);
    }

    let per_corner = (config.circle_segments(r) / 4).max(1);
    let centers = [
        (Point2::new(max.x - r, min.y + r), -FRAC_PI_2),
        (Point2::new(max.x - r, max.y - r), 0.0),
        (Point2::new(min.x + r, max.y - r), FRAC_PI_2),
        (Point2::new(min.x + r, min.y + r), std::f64::consts::PI),
    ];

    let mut points = Vec::with_capacity(4 * (per_corner + 1));
    for (center, start) in centers {
        for i in 0..=per_corner {
            let theta = start + FRAC_PI_2 * i as f64 / per_corner as f64;
            points.push(Point2::new(center.x + r * theta.cos(), center.y + r * theta.sin()));
        }
    }
    // Full-width edges collapse corner endpoints onto each other.
    points.dedup_by(|a, b| (*a - *b).norm() < 1e-9);
    if points.len() > 1 && (points[0] - points[points.len() - 1]).norm() < 1e-9 {
        points.pop();
    }
    points
}

/// Petal discs evenly spaced on a ring around `center`.
///
/// The first petal points straight up. Union the returned discs (and
/// usually a center disc) to obtain the flower outline.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn flower_petals(
    center: Point2,
    petals: usize,
    ring_radius: f64,
    petal_radius: f64,
    config: &BuildConfig,
) -> Vec<Vec<Point2>> {
    (0..petals)
        .map(|i| {
            let theta = FRAC_PI_2 + TAU * i as f64 / petals as f64;
            let c = Point2::new(
                center.x + ring_radius * theta.cos(),
                center.y + ring_radius * theta.sin(),
            );
            circle(c, petal_radius, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::signed_area;
    use std::f64::consts::PI;

    #[test]
    fn circle_area_close_to_pi_r2() {
        let config = BuildConfig::default();
        let c = circle(Point2::origin(), 5.0, &config);
        let area = signed_area(&c);
        assert!(area > 0.0);
        assert!((area - PI * 25.0).abs() / (PI * 25.0) < 0.01);
    }

    #[test]
    fn rect_is_ccw() {
        let r = rect(Point2::new(0.0, 0.0), Point2::new(4.0, 2.0));
        assert!((signed_area(&r) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn rounded_rect_area() {
        let config = BuildConfig::default();
        let r = rounded_rect(Point2::new(0.0, 0.0), Point2::new(20.0, 10.0), 2.0, &config);
        let expected = 200.0 - (4.0 - PI) * 4.0;
        let area = signed_area(&r);
        assert!(area > 0.0);
        assert!((area - expected).abs() < 0.2, "area {area}");
    }

    #[test]
    fn rounded_rect_radius_clamped() {
        let config = BuildConfig::default();
        let r = rounded_rect(Point2::new(0.0, 0.0), Point2::new(10.0, 4.0), 50.0, &config);
        let b = crate::math::Aabb2::from_points(&r);
        assert!(b.is_some_and(|b| (b.height() - 4.0).abs() < 1e-9 && (b.width() - 10.0).abs() < 1e-9));
    }

    #[test]
    fn zero_radius_is_plain_rect() {
        let config = BuildConfig::default();
        let r = rounded_rect(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), 0.0, &config);
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn flower_petals_on_ring() {
        let config = BuildConfig::default();
        let petals = flower_petals(Point2::origin(), 6, 10.0, 4.0, &config);
        assert_eq!(petals.len(), 6);
        let top = crate::math::Aabb2::from_points(&petals[0]);
        assert!(top.is_some_and(|b| (b.center().y - 10.0).abs() < 0.01 && b.center().x.abs() < 0.01));
    }
}
