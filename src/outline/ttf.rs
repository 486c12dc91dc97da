use std::collections::HashMap;

use tracing::debug;
use ttf_parser::{Face, OutlineBuilder};

use crate::error::{OutlineError, Result};
use crate::math::Point2;

use super::{group_contours, GlyphOutline, GlyphOutliner};

/// Segments per quadratic or cubic curve.
const CURVE_STEPS: usize = 8;

/// Advance used for characters missing from the font, in ems.
const MISSING_ADVANCE: f64 = 0.3;

/// Flattened glyph in font units.
#[derive(Debug, Clone)]
struct CachedGlyph {
    contours: Vec<Vec<Point2>>,
    advance: f64,
}

impl CachedGlyph {
    /// Blank glyph standing in for a character the font lacks.
    fn missing(units_per_em: f64) -> Self {
        Self {
            contours: Vec::new(),
            advance: MISSING_ADVANCE * units_per_em,
        }
    }
}

/// Baseline pen converting font units to millimetres.
#[derive(Debug, Clone, Copy)]
struct Pen {
    x: f64,
    scale: f64,
}

impl Pen {
    fn new(size: f64, units_per_em: f64) -> Self {
        Self {
            x: 0.0,
            scale: size / units_per_em,
        }
    }

    /// Contours of `glyph` scaled and moved to the pen position.
    fn place(&self, glyph: &CachedGlyph) -> Vec<Vec<Point2>> {
        glyph
            .contours
            .iter()
            .map(|contour| {
                contour
                    .iter()
                    .map(|p| Point2::new(p.x * self.scale + self.x, p.y * self.scale))
                    .collect()
            })
            .collect()
    }

    fn advance(&mut self, glyph: &CachedGlyph) {
        self.x += glyph.advance * self.scale;
    }
}

/// Characters that take part in layout.
fn printable(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| !c.is_control())
}

/// Outlines text from TrueType/OpenType font data.
///
/// Flattened glyphs are cached per character for the lifetime of the
/// outliner, so repeated rebuilds with the same font skip curve flattening.
#[derive(Debug, Clone)]
pub struct TtfOutliner {
    data: Vec<u8>,
    units_per_em: f64,
    cache: HashMap<char, CachedGlyph>,
}

impl TtfOutliner {
    /// Creates an outliner from raw font bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::FontParse`] if the data is not a usable font.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let face = Face::parse(&data, 0).map_err(|e| OutlineError::FontParse(e.to_string()))?;
        let units_per_em = f64::from(face.units_per_em());
        Ok(Self {
            data,
            units_per_em,
            cache: HashMap::new(),
        })
    }

    /// Number of distinct characters flattened so far.
    #[must_use]
    pub fn cached_glyphs(&self) -> usize {
        self.cache.len()
    }

    fn glyph(&mut self, ch: char) -> Result<CachedGlyph> {
        if let Some(cached) = self.cache.get(&ch) {
            return Ok(cached.clone());
        }
        let face =
            Face::parse(&self.data, 0).map_err(|e| OutlineError::FontParse(e.to_string()))?;

        let glyph = match face.glyph_index(ch) {
            Some(id) => {
                let mut flattener = Flattener::new();
                if face.outline_glyph(id, &mut flattener).is_none() {
                    debug!(?ch, "glyph has no outline");
                }
                let advance = face
                    .glyph_hor_advance(id)
                    .map_or(MISSING_ADVANCE * self.units_per_em, f64::from);
                CachedGlyph {
                    contours: flattener.finish(),
                    advance,
                }
            }
            None => {
                debug!(?ch, "character missing from font");
                CachedGlyph::missing(self.units_per_em)
            }
        };
        self.cache.insert(ch, glyph.clone());
        Ok(glyph)
    }
}

impl GlyphOutliner for TtfOutliner {
    fn generate_outline(&mut self, text: &str, size: f64) -> Result<Vec<GlyphOutline>> {
        if !size.is_finite() || size <= 0.0 {
            return Err(OutlineError::InvalidRequest(format!("font size {size}")).into());
        }
        let mut pen = Pen::new(size, self.units_per_em);
        let mut outlines = Vec::new();
        for ch in printable(text) {
            let glyph = self.glyph(ch)?;
            outlines.extend(group_contours(pen.place(&glyph)));
            pen.advance(&glyph);
        }
        Ok(outlines)
    }
}

/// Collects closed contours from `ttf_parser` outline callbacks.
#[derive(Debug)]
struct Flattener {
    contours: Vec<Vec<Point2>>,
    current: Vec<Point2>,
    last: Point2,
}

impl Flattener {
    fn new() -> Self {
        Self {
            contours: Vec::new(),
            current: Vec::new(),
            last: Point2::origin(),
        }
    }

    fn push(&mut self, p: Point2) {
        self.current.push(p);
        self.last = p;
    }

    fn flush(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        if contour.len() > 1 && contour.first() == contour.last() {
            contour.pop();
        }
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }

    fn finish(mut self) -> Vec<Vec<Point2>> {
        self.flush();
        self.contours
    }
}

#[allow(clippy::cast_precision_loss)]
fn step(i: usize) -> f64 {
    i as f64 / CURVE_STEPS as f64
}

impl OutlineBuilder for Flattener {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        self.push(Point2::new(f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(Point2::new(f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p0 = self.last;
        let c = Point2::new(f64::from(x1), f64::from(y1));
        let p1 = Point2::new(f64::from(x), f64::from(y));
        for i in 1..=CURVE_STEPS {
            let t = step(i);
            let mt = 1.0 - t;
            let coords = p0.coords * (mt * mt) + c.coords * (2.0 * mt * t) + p1.coords * (t * t);
            self.push(Point2::from(coords));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.last;
        let c0 = Point2::new(f64::from(x1), f64::from(y1));
        let c1 = Point2::new(f64::from(x2), f64::from(y2));
        let p1 = Point2::new(f64::from(x), f64::from(y));
        for i in 1..=CURVE_STEPS {
            let t = step(i);
            let mt = 1.0 - t;
            let coords = p0.coords * (mt * mt * mt)
                + c0.coords * (3.0 * mt * mt * t)
                + c1.coords * (3.0 * mt * t * t)
                + p1.coords * (t * t * t);
            self.push(Point2::from(coords));
        }
    }

    fn close(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Upright bar 100 units wide and 700 tall.
    fn bar() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 700.0),
            Point2::new(0.0, 700.0),
        ]
    }

    /// Outliner whose cache already holds `I` and space; any other
    /// character needs the (empty) font data.
    fn seeded() -> TtfOutliner {
        let mut cache = HashMap::new();
        cache.insert(
            'I',
            CachedGlyph {
                contours: vec![bar()],
                advance: 600.0,
            },
        );
        cache.insert(
            ' ',
            CachedGlyph {
                contours: Vec::new(),
                advance: 250.0,
            },
        );
        TtfOutliner {
            data: Vec::new(),
            units_per_em: 1000.0,
            cache,
        }
    }

    #[test]
    fn pen_scales_and_advances() {
        let glyph = CachedGlyph {
            contours: vec![bar()],
            advance: 600.0,
        };
        let mut pen = Pen::new(10.0, 1000.0);
        let first = pen.place(&glyph);
        assert_relative_eq!(first[0][2].x, 1.0);
        assert_relative_eq!(first[0][2].y, 7.0);
        pen.advance(&glyph);
        assert_relative_eq!(pen.x, 6.0);
        let second = pen.place(&glyph);
        assert_relative_eq!(second[0][0].x, 6.0);
        assert_relative_eq!(second[0][2].x, 7.0);
    }

    #[test]
    fn missing_glyph_advances_without_ink() {
        let glyph = CachedGlyph::missing(2048.0);
        let mut pen = Pen::new(10.0, 2048.0);
        assert!(pen.place(&glyph).is_empty());
        pen.advance(&glyph);
        assert_relative_eq!(pen.x, 10.0 * MISSING_ADVANCE);
    }

    #[test]
    fn control_characters_are_skipped() {
        assert_eq!(printable("a\tb\nc\u{7}").collect::<String>(), "abc");
    }

    #[test]
    fn layout_uses_cached_glyphs() {
        let mut outliner = seeded();
        let outlines = outliner.generate_outline("I I\n", 10.0).unwrap();
        assert_eq!(outlines.len(), 2);
        assert_relative_eq!(outlines[0].outer[0].x, 0.0);
        // 600 + 250 units at 10 mm per 1000 units
        assert_relative_eq!(outlines[1].outer[0].x, 8.5);
        assert_relative_eq!(outlines[1].outer[2].y, 7.0);
        assert_eq!(outliner.cached_glyphs(), 2);
    }

    #[test]
    fn cache_miss_reads_font_and_failures_are_not_cached() {
        let mut outliner = seeded();
        assert!(outliner.generate_outline("IQ", 10.0).is_err());
        assert_eq!(outliner.cached_glyphs(), 2);
    }

    #[test]
    fn rejects_non_positive_size() {
        let mut outliner = seeded();
        assert!(outliner.generate_outline("I", 0.0).is_err());
        assert!(outliner.generate_outline("I", f64::NAN).is_err());
    }

    #[test]
    fn rejects_garbage_font() {
        let err = TtfOutliner::new(vec![0, 1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains("font could not be parsed"));
    }

    #[test]
    fn flattener_closes_contours() {
        let mut f = Flattener::new();
        f.move_to(0.0, 0.0);
        f.line_to(10.0, 0.0);
        f.quad_to(10.0, 10.0, 0.0, 10.0);
        f.line_to(0.0, 0.0);
        f.close();
        f.move_to(20.0, 20.0);
        f.line_to(21.0, 20.0);
        f.close();
        let contours = f.finish();
        assert_eq!(contours.len(), 1);
        // move, line, 8 quad steps; closing duplicate removed
        assert_eq!(contours[0].len(), 2 + CURVE_STEPS);
    }

    #[test]
    fn cubic_ends_on_target() {
        let mut f = Flattener::new();
        f.move_to(0.0, 0.0);
        f.curve_to(0.0, 5.0, 5.0, 10.0, 10.0, 10.0);
        f.line_to(10.0, 0.0);
        let contours = f.finish();
        let end = contours[0][CURVE_STEPS];
        assert!((end.x - 10.0).abs() < 1e-9 && (end.y - 10.0).abs() < 1e-9);
    }
}
