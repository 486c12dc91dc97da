use std::collections::HashMap;

use tracing::debug;

use crate::config::{BuildConfig, PLACEHOLDER_EM, SCALE};
use crate::error::Result;
use crate::math::Point2;
use crate::outline::GlyphOutliner;
use crate::polygon::{Difference, Offset, Orientation, Path, PolygonTree, Union};
use crate::primitives::rect;
use crate::shape::{Region, ToRegions};

use super::keyring::Keyring;

const TEXT_CACHE_LIMIT: usize = 64;

/// Merged text outlines keyed by string and size.
///
/// Holds only values that are a pure function of the key and the outliner,
/// so hits and misses produce identical composites.
#[derive(Debug, Default)]
pub(crate) struct TextCache {
    entries: HashMap<(String, u64), PolygonTree>,
}

impl TextCache {
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Millimetres to engine units.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn to_engine(mm: f64) -> i64 {
    (mm * SCALE).round() as i64
}

/// 2D drawing context shared by every design variant.
pub(crate) struct Sketch<'a, O> {
    outliner: &'a mut O,
    cache: &'a mut TextCache,
    pub(crate) config: &'a BuildConfig,
}

impl<'a, O: GlyphOutliner> Sketch<'a, O> {
    pub(crate) fn new(outliner: &'a mut O, cache: &'a mut TextCache, config: &'a BuildConfig) -> Self {
        Self {
            outliner,
            cache,
            config,
        }
    }

    /// Glyph outlines of `text` merged into one tree.
    ///
    /// Empty text is replaced by a single space. The result may still be
    /// empty; callers fall back to [`Sketch::placeholder`].
    pub(crate) fn text(&mut self, text: &str, size: f64) -> Result<PolygonTree> {
        let text = if text.is_empty() {
            debug!("empty text replaced by a space");
            " "
        } else {
            text
        };

        let key = (text.to_owned(), size.to_bits());
        if let Some(tree) = self.cache.entries.get(&key) {
            return Ok(tree.clone());
        }

        let glyphs = self.outliner.generate_outline(text, size)?;
        let mut paths = Vec::new();
        for glyph in &glyphs {
            paths.push(Path::from_points_f64(&glyph.outer).with_orientation(Orientation::Clockwise));
            paths.extend(
                glyph
                    .holes
                    .iter()
                    .map(|h| Path::from_points_f64(h).with_orientation(Orientation::CounterClockwise)),
            );
        }
        let tree = Union::new(paths).execute()?;

        if self.cache.entries.len() >= TEXT_CACHE_LIMIT {
            self.cache.clear();
        }
        self.cache.entries.insert(key, tree.clone());
        Ok(tree)
    }

    /// Square stand-in footprint centered on the origin.
    pub(crate) fn placeholder(&self, size: f64) -> Result<PolygonTree> {
        let half = 0.5 * PLACEHOLDER_EM * size;
        debug!(size, "text produced no outline, using placeholder footprint");
        let square = rect(Point2::new(-half, -half), Point2::new(half, half));
        Union::filled(vec![Path::from_points_f64(&square)]).execute()
    }

    /// Outline band: `tree` grown by `thickness` millimetres, merged.
    pub(crate) fn band(&self, tree: &PolygonTree, thickness: f64) -> Result<PolygonTree> {
        let grown = Offset::new(tree.contours(), to_engine(thickness))
            .with_arc_tolerance(self.config.arc_tolerance * SCALE)
            .execute()?;
        Union::new(grown).execute()
    }

    /// Merges filled trees into one.
    pub(crate) fn merge(&self, trees: &[&PolygonTree]) -> Result<PolygonTree> {
        Union::new(trees.iter().flat_map(|t| t.contours()).collect()).execute()
    }

    /// Unions the keyring disc onto `base` and cuts its hole.
    pub(crate) fn attach_keyring(&self, base: PolygonTree, keyring: Option<&Keyring>) -> Result<PolygonTree> {
        let Some(keyring) = keyring else {
            return Ok(base);
        };
        let mut paths = base.contours();
        paths.push(keyring.disc(self.config));
        let merged = Union::new(paths).execute()?;
        match keyring.hole(self.config) {
            Some(hole) => Difference::new(merged.contours(), vec![hole]).execute(),
            None => Ok(merged),
        }
    }

    /// Filled frame between two nested closed contours given in millimetres.
    pub(crate) fn frame(&self, outer: &[Point2], inner: &[Point2]) -> Result<PolygonTree> {
        Difference::new(
            vec![Path::from_points_f64(outer).with_orientation(Orientation::Clockwise)],
            vec![Path::from_points_f64(inner).with_orientation(Orientation::Clockwise)],
        )
        .execute()
    }

    /// Filled shapes given as independent millimetre contours, merged.
    pub(crate) fn shapes(&self, contours: &[Vec<Point2>]) -> Result<PolygonTree> {
        Union::filled(contours.iter().map(|c| Path::from_points_f64(c)).collect()).execute()
    }
}

/// Extrudable regions of a tree.
pub(crate) fn regions(tree: &PolygonTree) -> Vec<Region> {
    ToRegions::new(tree).execute()
}
