use crate::error::Result;
use crate::outline::GlyphOutliner;

use super::composite::{LayerKind, Material};
use super::design::{non_negative, positive};
use super::keyring::{Keyring, KeyringParams};
use super::layers::{stack_on, Alignment, LayerPlan};
use super::sketch::{regions, Sketch};

/// Raised text on a base following the text outline at a fixed distance.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineKeychain {
    pub text: String,
    pub font_size: f64,
    /// Distance between the glyph edges and the base edge.
    pub outline_thickness: f64,
    pub base_depth: f64,
    pub text_depth: f64,
    pub keyring: KeyringParams,
    pub base_material: Material,
    pub text_material: Material,
}

impl Default for OutlineKeychain {
    fn default() -> Self {
        Self {
            text: "Name".to_owned(),
            font_size: 12.0,
            outline_thickness: 2.5,
            base_depth: 3.0,
            text_depth: 2.0,
            keyring: KeyringParams::default(),
            base_material: Material::new("base"),
            text_material: Material::new("text"),
        }
    }
}

impl OutlineKeychain {
    pub(crate) fn validate(&self) -> Result<()> {
        positive("font_size", self.font_size)?;
        non_negative("outline_thickness", self.outline_thickness)?;
        positive("base_depth", self.base_depth)?;
        positive("text_depth", self.text_depth)
    }

    /// Text, then its offset band merged with the keyring disc, minus the
    /// keyring hole.
    pub(crate) fn plan<O: GlyphOutliner>(&self, sketch: &mut Sketch<'_, O>) -> Result<Vec<LayerPlan>> {
        let text = sketch.text(&self.text, self.font_size)?;
        let has_text = !text.is_empty();
        let footprint = if has_text {
            text.clone()
        } else {
            sketch.placeholder(self.font_size)?
        };
        let Some(reference) = footprint.bounds() else {
            return Ok(Vec::new());
        };

        let keyring = Keyring::resolve(&self.keyring, &reference);
        let band = sketch.band(&footprint, self.outline_thickness)?;
        let base = sketch.attach_keyring(band, keyring.as_ref())?;

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
                LayerKind::Text,
                regions(&text),
                self.text_depth,
                self.text_material.clone(),
            )
            .at(stack_on(self.base_depth, sketch.config.embed)),
        ])
    }
}
