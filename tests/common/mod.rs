//! Deterministic glyph outliner shared by the integration tests.

use keysmith::math::Point2;
use keysmith::outline::{GlyphOutline, GlyphOutliner};
use keysmith::primitives::rect;
use keysmith::Result;

/// Block letters: every visible character is a rectangle, and letters with
/// a counter (`a`, `e`, `o`, `A`, `O`, ...) get one rectangular hole.
pub struct BlockFont;

impl GlyphOutliner for BlockFont {
    fn generate_outline(&mut self, text: &str, size: f64) -> Result<Vec<GlyphOutline>> {
        let mut out = Vec::new();
        let mut x = 0.0;
        for c in text.chars() {
            if !c.is_whitespace() {
                let top = if c.is_uppercase() { size } else { 0.7 * size };
                let outer = rect(Point2::new(x, 0.0), Point2::new(x + 0.6 * size, top));
                let holes = if "aeoAOBD".contains(c) {
                    vec![rect(
                        Point2::new(x + 0.2 * size, 0.2 * size),
                        Point2::new(x + 0.4 * size, top - 0.2 * size),
                    )]
                } else {
                    vec![]
                };
                out.push(GlyphOutline { outer, holes });
            }
            x += 0.7 * size;
        }
        Ok(out)
    }
}
