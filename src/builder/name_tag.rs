use crate::error::Result;
use crate::math::{Aabb2, Point2, Vector2};
use crate::outline::GlyphOutliner;
use crate::polygon::PolygonTree;
use crate::primitives::rounded_rect;

use super::composite::{LayerKind, Material};
use super::design::{non_negative, positive};
use super::keyring::{Keyring, KeyringParams};
use super::layers::{stack_on, Alignment, LayerPlan};
use super::sketch::{regions, Sketch};

/// Rounded plate sized around its text, with a raised border frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NameTag {
    pub text: String,
    pub font_size: f64,
    /// Clearance between the text bounding box and the plate edge.
    pub padding: f64,
    pub corner_radius: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub base_depth: f64,
    /// Frame width; zero omits the border.
    pub border_width: f64,
    pub border_depth: f64,
    pub text_depth: f64,
    pub keyring: KeyringParams,
    pub base_material: Material,
    pub border_material: Material,
    pub text_material: Material,
}

impl Default for NameTag {
    fn default() -> Self {
        Self {
            text: "Hello".to_owned(),
            font_size: 8.0,
            padding: 3.0,
            corner_radius: 2.0,
            min_width: 30.0,
            min_height: 12.0,
            base_depth: 2.0,
            border_width: 1.2,
            border_depth: 1.0,
            text_depth: 1.0,
            keyring: KeyringParams {
                offset: Vector2::new(-2.5, 0.0),
                ..KeyringParams::default()
            },
            base_material: Material::new("base"),
            border_material: Material::new("accent"),
            text_material: Material::new("text"),
        }
    }
}

impl NameTag {
    pub(crate) fn validate(&self) -> Result<()> {
        positive("font_size", self.font_size)?;
        non_negative("padding", self.padding)?;
        non_negative("corner_radius", self.corner_radius)?;
        non_negative("min_width", self.min_width)?;
        non_negative("min_height", self.min_height)?;
        positive("base_depth", self.base_depth)?;
        non_negative("border_width", self.border_width)?;
        positive("border_depth", self.border_depth)?;
        positive("text_depth", self.text_depth)
    }

    /// Plate bounds: the text box padded, then grown symmetrically to the
    /// minimum size.
    fn plate(&self, reference: &Aabb2) -> Aabb2 {
        let padded = reference.expanded(self.padding);
        let c = padded.center();
        let hw = 0.5 * padded.width().max(self.min_width);
        let hh = 0.5 * padded.height().max(self.min_height);
        Aabb2::new(Point2::new(c.x - hw, c.y - hh), Point2::new(c.x + hw, c.y + hh))
    }

    fn border<O: GlyphOutliner>(&self, sketch: &Sketch<'_, O>, plate: &Aabb2, outer: &[Point2]) -> Result<PolygonTree> {
        let inner = plate.expanded(-self.border_width);
        if self.border_width <= 0.0 || inner.width() <= 0.0 || inner.height() <= 0.0 {
            return Ok(PolygonTree::new());
        }
        let inner_radius = (self.corner_radius - self.border_width).max(0.0);
        let inner = rounded_rect(inner.min, inner.max, inner_radius, sketch.config);
        sketch.frame(outer, &inner)
    }

    pub(crate) fn plan<O: GlyphOutliner>(&self, sketch: &mut Sketch<'_, O>) -> Result<Vec<LayerPlan>> {
        let text = sketch.text(&self.text, self.font_size)?;
        let has_text = !text.is_empty();
        let reference = match text.bounds() {
            Some(b) => b,
            None => match sketch.placeholder(self.font_size)?.bounds() {
                Some(b) => b,
                None => return Ok(Vec::new()),
            },
        };

        let plate = self.plate(&reference);
        let outer = rounded_rect(plate.min, plate.max, self.corner_radius, sketch.config);
        let keyring = Keyring::resolve(&self.keyring, &plate);
        let base = sketch.attach_keyring(sketch.shapes(&[outer.clone()])?, keyring.as_ref())?;
        let border = self.border(sketch, &plate, &outer)?;

        let top = stack_on(self.base_depth, sketch.config.embed);
        let frame_alignment = if has_text {
            Alignment::Follow(LayerKind::Text)
        } else {
            Alignment::Follow(LayerKind::Base)
        };
        let base_alignment = if has_text {
            Alignment::Follow(LayerKind::Text)
        } else {
            Alignment::Centered
        };

        Ok(vec![
            LayerPlan::new(
                LayerKind::Base,
                regions(&base),
                self.base_depth,
                self.base_material.clone(),
            )
            .aligned(base_alignment),
            LayerPlan::new(
                LayerKind::Border,
                regions(&border),
                self.border_depth,
                self.border_material.clone(),
            )
            .at(top)
            .aligned(frame_alignment),
            LayerPlan::new(
                LayerKind::Text,
                regions(&text),
                self.text_depth,
                self.text_material.clone(),
            )
            .at(top),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plate_respects_minimum_size() {
        let tag = NameTag::default();
        let small = Aabb2::new(Point2::new(0.0, 0.0), Point2::new(4.0, 2.0));
        let plate = tag.plate(&small);
        assert_relative_eq!(plate.width(), tag.min_width);
        assert_relative_eq!(plate.height(), tag.min_height);
        assert_relative_eq!(plate.center().x, 2.0);
        assert_relative_eq!(plate.center().y, 1.0);
    }

    #[test]
    fn plate_pads_large_text() {
        let tag = NameTag::default();
        let wide = Aabb2::new(Point2::new(0.0, 0.0), Point2::new(60.0, 10.0));
        let plate = tag.plate(&wide);
        assert_relative_eq!(plate.width(), 60.0 + 2.0 * tag.padding);
        assert_relative_eq!(plate.height(), 10.0 + 2.0 * tag.padding);
    }
}
