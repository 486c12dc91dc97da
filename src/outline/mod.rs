//! Glyph outline providers.
//!
//! The solid builder only depends on [`GlyphOutliner`]; the bundled
//! [`TtfOutliner`] reads TrueType/OpenType fonts.

mod ttf;

pub use ttf::TtfOutliner;

use crate::error::Result;
use crate::math::polygon_2d::{contains_point, signed_area};
use crate::math::Point2;

/// One filled glyph contour and the holes cut into it, in millimetres.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphOutline {
    pub outer: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

/// Produces laid-out outlines for a string.
pub trait GlyphOutliner {
    /// Returns outlines in string order, already positioned along the
    /// baseline at the requested `size` (em height in millimetres).
    ///
    /// Characters without ink (spaces) contribute no entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot outline the request.
    fn generate_outline(&mut self, text: &str, size: f64) -> Result<Vec<GlyphOutline>>;
}

/// Groups raw closed contours into filled outlines with their holes.
///
/// The largest contour is always filled and sets the glyph's fill winding:
/// contours wound the same way are filled, the others are holes. Each hole
/// joins the smallest filled contour enclosing it and is dropped if none
/// does. Filled contours may overlap; a non-zero union merges them.
#[must_use]
pub fn group_contours(contours: Vec<Vec<Point2>>) -> Vec<GlyphOutline> {
    let contours: Vec<(Vec<Point2>, f64)> = contours
        .into_iter()
        .filter(|c| c.len() >= 3)
        .map(|c| {
            let area = signed_area(&c);
            (c, area)
        })
        .filter(|(_, area)| area.abs() > 0.0)
        .collect();

    let Some(fill_ccw) = contours
        .iter()
        .map(|(_, area)| *area)
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .map(|area| area > 0.0)
    else {
        return Vec::new();
    };
    let is_fill = |area: f64| (area > 0.0) == fill_ccw;

    let mut outlines: Vec<Option<GlyphOutline>> = contours
        .iter()
        .map(|(contour, area)| {
            is_fill(*area).then(|| GlyphOutline {
                outer: contour.clone(),
                holes: Vec::new(),
            })
        })
        .collect();

    for (i, (contour, area)) in contours.iter().enumerate() {
        if is_fill(*area) {
            continue;
        }
        let parent = contours
            .iter()
            .enumerate()
            .filter(|&(j, (other, other_area))| {
                j != i && is_fill(*other_area) && contains_point(other, &contour[0])
            })
            .min_by(|(_, (_, a)), (_, (_, b))| a.abs().total_cmp(&b.abs()))
            .map(|(j, _)| j);
        if let Some(outline) = parent.and_then(|p| outlines[p].as_mut()) {
            outline.holes.push(contour.clone());
        }
    }
    outlines.into_iter().flatten().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
        ]
    }

    fn reversed(mut contour: Vec<Point2>) -> Vec<Point2> {
        contour.reverse();
        contour
    }

    #[test]
    fn letter_o_groups_hole() {
        let grouped = group_contours(vec![reversed(square(2.0, 2.0, 6.0)), square(0.0, 0.0, 10.0)]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].outer, square(0.0, 0.0, 10.0));
        assert_eq!(grouped[0].holes.len(), 1);
    }

    #[test]
    fn clockwise_fonts_group_the_same_way() {
        let grouped = group_contours(vec![reversed(square(0.0, 0.0, 10.0)), square(2.0, 2.0, 6.0)]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].holes, vec![square(2.0, 2.0, 6.0)]);
    }

    #[test]
    fn separate_contours_stay_separate() {
        // dotted i
        let grouped = group_contours(vec![square(0.0, 0.0, 1.0), square(0.0, 3.0, 1.0)]);
        assert_eq!(grouped.len(), 2);
        assert!(grouped.iter().all(|g| g.holes.is_empty()));
    }

    #[test]
    fn overlapping_fills_stay_filled() {
        let grouped = group_contours(vec![square(0.0, 0.0, 10.0), square(5.0, 5.0, 10.0)]);
        assert_eq!(grouped.len(), 2);
        assert!(grouped.iter().all(|g| g.holes.is_empty()));
    }

    #[test]
    fn contained_fill_of_same_winding_is_not_a_hole() {
        let grouped = group_contours(vec![square(0.0, 0.0, 10.0), square(2.0, 2.0, 6.0)]);
        assert_eq!(grouped.len(), 2);
        assert!(grouped.iter().all(|g| g.holes.is_empty()));
    }

    #[test]
    fn island_in_hole_is_new_outline() {
        let grouped = group_contours(vec![
            square(0.0, 0.0, 10.0),
            reversed(square(2.0, 2.0, 6.0)),
            square(4.0, 4.0, 2.0),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.iter().map(|g| g.holes.len()).sum::<usize>(), 1);
        // The hole belongs to the large contour, not the island.
        let big = grouped.iter().find(|g| g.outer == square(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(big.holes.len(), 1);
    }

    #[test]
    fn degenerate_contours_dropped() {
        let grouped = group_contours(vec![vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]]);
        assert!(grouped.is_empty());
    }
}
