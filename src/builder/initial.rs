use crate::error::Result;
use crate::math::Vector2;
use crate::outline::GlyphOutliner;

use super::composite::{LayerKind, Material};
use super::design::{finite, non_negative, positive};
use super::keyring::{Keyring, KeyringParams};
use super::layers::{stack_on, Alignment, LayerPlan};
use super::sketch::{regions, to_engine, Sketch};

/// A large initial with smaller text placed relative to it, both raised
/// from a base following their combined outline.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialKeychain {
    pub initial: String,
    pub initial_size: f64,
    pub text: String,
    pub text_size: f64,
    /// Text center relative to the initial's bounding-box center.
    pub text_offset: Vector2,
    pub outline_thickness: f64,
    pub base_depth: f64,
    pub initial_depth: f64,
    /// Height of the text above the initial's top face.
    pub text_depth: f64,
    pub keyring: KeyringParams,
    pub base_material: Material,
    pub initial_material: Material,
    pub text_material: Material,
}

impl Default for InitialKeychain {
    fn default() -> Self {
        Self {
            initial: "A".to_owned(),
            initial_size: 30.0,
            text: "Anna".to_owned(),
            text_size: 8.0,
            text_offset: Vector2::new(0.0, -6.0),
            outline_thickness: 2.0,
            base_depth: 2.0,
            initial_depth: 1.5,
            text_depth: 1.0,
            keyring: KeyringParams {
                offset: Vector2::new(-3.0, 0.0),
                ..KeyringParams::default()
            },
            base_material: Material::new("base"),
            initial_material: Material::new("accent"),
            text_material: Material::new("text"),
        }
    }
}

impl InitialKeychain {
    pub(crate) fn validate(&self) -> Result<()> {
        positive("initial_size", self.initial_size)?;
        positive("text_size", self.text_size)?;
        finite("text_offset.x", self.text_offset.x)?;
        finite("text_offset.y", self.text_offset.y)?;
        non_negative("outline_thickness", self.outline_thickness)?;
        positive("base_depth", self.base_depth)?;
        positive("initial_depth", self.initial_depth)?;
        positive("text_depth", self.text_depth)
    }

    /// The text is anchored to the initial's bounding box before both are
    /// offset together, so the base encloses the pair.
    pub(crate) fn plan<O: GlyphOutliner>(&self, sketch: &mut Sketch<'_, O>) -> Result<Vec<LayerPlan>> {
        let initial = sketch.text(&self.initial, self.initial_size)?;
        let has_initial = !initial.is_empty();
        let footprint = if has_initial {
            initial.clone()
        } else {
            sketch.placeholder(self.initial_size)?
        };
        let Some(reference) = footprint.bounds() else {
            return Ok(Vec::new());
        };

        let raw_text = sketch.text(&self.text, self.text_size)?;
        let text = match raw_text.bounds() {
            Some(b) => {
                let shift = reference.center() + self.text_offset - b.center();
                raw_text.translated(to_engine(shift.x), to_engine(shift.y))
            }
            None => raw_text,
        };

        let keyring = Keyring::resolve(&self.keyring, &reference);
        let outline = sketch.merge(&[&footprint, &text])?;
        let band = sketch.band(&outline, self.outline_thickness)?;
        let base = sketch.attach_keyring(band, keyring.as_ref())?;

        let top = stack_on(self.base_depth, sketch.config.embed);
        let (base_alignment, text_alignment) = if has_initial {
            (
                Alignment::Follow(LayerKind::Initial),
                Alignment::Follow(LayerKind::Initial),
            )
        } else {
            (Alignment::Centered, Alignment::Follow(LayerKind::Base))
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
                LayerKind::Initial,
                regions(&initial),
                self.initial_depth,
                self.initial_material.clone(),
            )
            .at(top),
            // Rises through the initial so overlapping glyphs never float.
            LayerPlan::new(
                LayerKind::Text,
                regions(&text),
                self.initial_depth + self.text_depth,
                self.text_material.clone(),
            )
            .at(top)
            .aligned(text_alignment),
        ])
    }
}
