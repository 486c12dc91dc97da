use crate::error::{BuildError, Result};
use crate::math::{BoxPoint, Point2, Vector2};
use crate::outline::GlyphOutliner;
use crate::primitives::{circle, flower_petals};

use super::composite::{LayerKind, Material};
use super::design::positive;
use super::keyring::{Keyring, KeyringParams};
use super::layers::{stack_on, Alignment, LayerPlan};
use super::sketch::{regions, Sketch};

/// A flower-shaped base with a raised center disc carrying text.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowerKeychain {
    pub petals: usize,
    pub petal_radius: f64,
    /// Distance from the flower center to each petal center.
    pub ring_radius: f64,
    pub center_radius: f64,
    pub text: String,
    pub text_size: f64,
    pub base_depth: f64,
    pub center_depth: f64,
    /// Height of the text above the center disc's top face.
    pub text_depth: f64,
    pub keyring: KeyringParams,
    pub base_material: Material,
    pub center_material: Material,
    pub text_material: Material,
}

impl Default for FlowerKeychain {
    fn default() -> Self {
        Self {
            petals: 6,
            petal_radius: 7.0,
            ring_radius: 8.0,
            center_radius: 7.0,
            text: "B".to_owned(),
            text_size: 9.0,
            base_depth: 3.0,
            center_depth: 1.0,
            text_depth: 1.0,
            keyring: KeyringParams {
                anchor: BoxPoint::TopCenter,
                offset: Vector2::new(0.0, -3.0),
                ..KeyringParams::default()
            },
            base_material: Material::new("base"),
            center_material: Material::new("accent"),
            text_material: Material::new("text"),
        }
    }
}

impl FlowerKeychain {
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn validate(&self) -> Result<()> {
        if self.petals < 3 {
            return Err(BuildError::InvalidParameter {
                parameter: "petals",
                value: self.petals as f64,
                reason: "at least three petals are required",
            }
            .into());
        }
        positive("petal_radius", self.petal_radius)?;
        positive("ring_radius", self.ring_radius)?;
        positive("center_radius", self.center_radius)?;
        positive("text_size", self.text_size)?;
        positive("base_depth", self.base_depth)?;
        positive("center_depth", self.center_depth)?;
        positive("text_depth", self.text_depth)
    }

    /// Petals and a hub disc merged into the base; the center disc and the
    /// text are centered on their own bounding boxes.
    pub(crate) fn plan<O: GlyphOutliner>(&self, sketch: &mut Sketch<'_, O>) -> Result<Vec<LayerPlan>> {
        let origin = Point2::origin();
        let mut contours = flower_petals(
            origin,
            self.petals,
            self.ring_radius,
            self.petal_radius,
            sketch.config,
        );
        contours.push(circle(origin, self.ring_radius, sketch.config));
        let flower = sketch.shapes(&contours)?;
        let Some(reference) = flower.bounds() else {
            return Ok(Vec::new());
        };

        let keyring = Keyring::resolve(&self.keyring, &reference);
        let base = sketch.attach_keyring(flower, keyring.as_ref())?;
        let center = sketch.shapes(&[circle(origin, self.center_radius, sketch.config)])?;
        let text = sketch.text(&self.text, self.text_size)?;

        let top = stack_on(self.base_depth, sketch.config.embed);
        Ok(vec![
            LayerPlan::new(
                LayerKind::Base,
                regions(&base),
                self.base_depth,
                self.base_material.clone(),
            )
            .aligned(Alignment::Follow(LayerKind::Center)),
            LayerPlan::new(
                LayerKind::Center,
                regions(&center),
                self.center_depth,
                self.center_material.clone(),
            )
            .at(top),
            LayerPlan::new(
                LayerKind::Text,
                regions(&text),
                self.center_depth + self.text_depth,
                self.text_material.clone(),
            )
            .at(top),
        ])
    }
}
