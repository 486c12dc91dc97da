//! Glue between engine paths and the integer Clipper backend.
//!
//! Engine coordinates are already integers, so they pass through `geo` as
//! integer-valued `f64` with a clipper factor of `1.0`. Nothing is rounded on
//! the way in and results are integral on the way out.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use geo_clipper::JoinType;
use tracing::debug;

use super::path::{IntPoint, Path};
use super::tree::PolygonTree;
use super::JoinStyle;

/// Clipper factor; engine paths are pre-scaled.
pub(crate) const FACTOR: f64 = 1.0;

/// Miter limit, in multiples of the offset distance.
const MITER_LIMIT: f64 = 2.0;

pub(crate) fn join_type(style: JoinStyle, arc_tolerance: f64) -> JoinType {
    match style {
        JoinStyle::Round => JoinType::Round(arc_tolerance),
        JoinStyle::Square => JoinType::Square,
        JoinStyle::Miter => JoinType::Miter(MITER_LIMIT),
    }
}

/// Drops paths that cannot enclose area.
pub(crate) fn usable_paths(paths: &[Path]) -> Vec<Path> {
    paths
        .iter()
        .filter_map(|path| match path.clone().validate() {
            Ok(valid) => Some(valid),
            Err(err) => {
                debug!(%err, "skipping path");
                None
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn path_to_ring(path: &Path) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = path
        .points()
        .iter()
        .map(|p| Coord {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect();
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    LineString::new(coords)
}

/// One single-ring polygon per path, orientation untouched so the non-zero
/// fill rule sees each contour's winding as given.
pub(crate) fn paths_to_multi(paths: &[Path]) -> MultiPolygon<f64> {
    MultiPolygon::new(
        paths
            .iter()
            .map(|path| Polygon::new(path_to_ring(path), vec![]))
            .collect(),
    )
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn ring_to_path(ring: &LineString<f64>) -> Path {
    Path::new(
        ring.coords()
            .map(|c| IntPoint::new(c.x.round() as i64, c.y.round() as i64))
            .collect(),
    )
}

/// Splits a clipper result into valid outer contours and their holes.
fn split_polygons(multi: &MultiPolygon<f64>) -> Vec<(Path, Vec<Path>)> {
    multi
        .0
        .iter()
        .filter_map(|polygon| {
            let outer = ring_to_path(polygon.exterior()).validate().ok()?;
            let holes = polygon
                .interiors()
                .iter()
                .filter_map(|ring| ring_to_path(ring).validate().ok())
                .collect();
            Some((outer, holes))
        })
        .collect()
}

/// Rebuilds the nested fill/hole/island hierarchy from a clipper result.
pub(crate) fn multi_to_tree(multi: &MultiPolygon<f64>) -> PolygonTree {
    PolygonTree::from_polygons(split_polygons(multi))
}
