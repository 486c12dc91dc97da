//! Property-based tests for the polygon engine, reconstruction and extrusion.

#![allow(clippy::unwrap_used)]

mod common;

use std::f64::consts::TAU;

use proptest::prelude::*;

use common::BlockFont;
use keysmith::builder::{Design, OutlineKeychain, SolidBuilder};
use keysmith::extrude::{Extruder, PrismExtruder};
use keysmith::math::polygon_2d::signed_area;
use keysmith::math::Point2;
use keysmith::polygon::{Difference, IntPoint, Offset, Orientation, Path, Union};
use keysmith::shape::{Region, ToRegions};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Star-shaped (hence simple) polygon around a random center, in millimetres.
fn arb_star() -> impl Strategy<Value = Vec<Point2>> {
    (
        (-100.0f64..100.0, -100.0f64..100.0),
        prop::collection::vec(1.0f64..40.0, 3..16),
    )
        .prop_map(|((cx, cy), radii)| {
            let n = radii.len() as f64;
            radii
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let theta = TAU * i as f64 / n;
                    Point2::new(cx + r * theta.cos(), cy + r * theta.sin())
                })
                .collect()
        })
}

/// Axis-aligned rectangle in engine units.
fn arb_rect() -> impl Strategy<Value = Path> {
    (-50_000i64..50_000, -50_000i64..50_000, 100i64..40_000, 100i64..40_000).prop_map(
        |(x, y, w, h)| {
            Path::new(vec![
                IntPoint::new(x, y),
                IntPoint::new(x + w, y),
                IntPoint::new(x + w, y + h),
                IntPoint::new(x, y + h),
            ])
        },
    )
}

fn offset_area(path: &Path, distance_mm: f64) -> f64 {
    let distance = (distance_mm * 1000.0).round() as i64;
    let grown = Offset::new(vec![path.clone()], distance).execute().unwrap();
    Union::new(grown).execute().unwrap().area()
}

// ---------------------------------------------------------------------------
// Union of a single simple path preserves its area
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn union_of_single_path_is_equivalent(points in arb_star()) {
        let path = Path::from_points_f64(&points);
        prop_assume!(path.clone().validate().is_ok());
        let tree = Union::filled(vec![path.clone()]).execute().unwrap();
        prop_assert_eq!(tree.roots.len(), 1);
        prop_assert!((tree.area() - path.area().abs()).abs() < 1e-6,
            "union area {} != path area {}", tree.area(), path.area().abs());
    }
}

// ---------------------------------------------------------------------------
// A minus A is empty
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn difference_with_self_is_empty(points in arb_star()) {
        let path = Path::from_points_f64(&points).with_orientation(Orientation::Clockwise);
        let tree = Difference::new(vec![path.clone()], vec![path]).execute().unwrap();
        prop_assert!(tree.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Reconstructed regions wind outer CCW, holes CW
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn regions_are_normalized(
        subject in prop::collection::vec(arb_rect(), 1..6),
        clip in prop::collection::vec(arb_rect(), 0..6),
    ) {
        // Reversing half the inputs checks that input winding does not leak through.
        let subject: Vec<Path> = subject
            .into_iter()
            .enumerate()
            .map(|(i, p)| if i % 2 == 0 { p } else { p.reversed() })
            .collect();
        let merged = Union::filled(subject).execute().unwrap();
        let tree = Difference::new(merged.contours(), clip).execute().unwrap();

        let regions = ToRegions::new(&tree).execute();
        for region in &regions {
            prop_assert!(signed_area(&region.outer) > 0.0);
            for hole in &region.holes {
                prop_assert!(signed_area(hole) < 0.0);
            }
        }
        let total: f64 = regions.iter().map(Region::area).sum();
        prop_assert!((total - tree.area()).abs() < 1e-6);
    }
}

// ---------------------------------------------------------------------------
// Extrusion z-extent equals the requested depth
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn extrusion_spans_depth(points in arb_star(), depth in 0.01f64..100.0) {
        let region = Region::new(points, vec![]);
        let mesh = PrismExtruder::new().extrude(&[region], depth).unwrap();
        let bounds = mesh.bounds().unwrap();
        prop_assert!(bounds.min.z.abs() < 1e-12);
        prop_assert!((bounds.size().z - depth).abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Offset area grows with distance
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn offset_is_monotonic(points in arb_star(), d1 in 0.0f64..5.0, delta in 0.01f64..5.0) {
        let path = Path::from_points_f64(&points).with_orientation(Orientation::Clockwise);
        prop_assume!(path.clone().validate().is_ok());
        let a1 = offset_area(&path, d1);
        let a2 = offset_area(&path, d1 + delta);
        prop_assert!(a2 >= a1, "area({}) = {} < area({}) = {}", d1 + delta, a2, d1, a1);
    }
}

// ---------------------------------------------------------------------------
// Rebuilding from identical parameters is deterministic
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn rebuild_is_idempotent(
        text in "[A-Za-z ]{0,6}",
        size in 4.0f64..20.0,
        thickness in 0.5f64..6.0,
    ) {
        let design = Design::from(OutlineKeychain {
            text,
            font_size: size,
            outline_thickness: thickness,
            ..OutlineKeychain::default()
        });
        let mut builder = SolidBuilder::with_outliner(BlockFont);
        let first = builder.build(&design).unwrap();
        let second = builder.build(&design).unwrap();
        prop_assert_eq!(first.vertex_count(), second.vertex_count());
        prop_assert_eq!(first.bounds(), second.bounds());
    }
}
