//! Per-design layer pipelines producing stacked composites.

mod composite;
mod design;
mod flower;
mod initial;
mod keyring;
mod layers;
mod name_tag;
mod outline;
mod sketch;

pub use composite::{Composite, LayerKind, Material, Solid};
pub use design::Design;
pub use flower::FlowerKeychain;
pub use initial::InitialKeychain;
pub use keyring::{Keyring, KeyringParams};
pub use layers::{stack_on, Alignment, LayerPlan};
pub use name_tag::NameTag;
pub use outline::OutlineKeychain;

use tracing::info;

use crate::config::BuildConfig;
use crate::error::{BuildError, Result};
use crate::extrude::{Extruder, PrismExtruder};
use crate::outline::GlyphOutliner;

use layers::Assemble;
use sketch::{Sketch, TextCache};

/// Turns designs into composites.
///
/// Owns its glyph outliner, extruder and text cache; separate builders
/// share nothing. `build` depends only on the design and configuration.
#[derive(Debug)]
pub struct SolidBuilder<O, E = PrismExtruder> {
    outliner: O,
    extruder: E,
    config: BuildConfig,
    cache: TextCache,
}

impl<O: GlyphOutliner> SolidBuilder<O, PrismExtruder> {
    /// Creates a builder using the prism extruder.
    #[must_use]
    pub fn with_outliner(outliner: O) -> Self {
        Self::new(outliner, PrismExtruder::new())
    }
}

impl<O: GlyphOutliner, E: Extruder> SolidBuilder<O, E> {
    #[must_use]
    pub fn new(outliner: O, extruder: E) -> Self {
        Self {
            outliner,
            extruder,
            config: BuildConfig::default(),
            cache: TextCache::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self.cache.clear();
        self
    }

    /// Extrudes hand-made layer plans and resolves their alignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the extruder rejects a layer.
    pub fn assemble(&self, plans: Vec<LayerPlan>) -> Result<Composite> {
        Assemble::new(plans, &self.extruder).execute()
    }

    /// Builds every layer of `design` and stacks them into a composite.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is invalid, a collaborator fails, or
    /// the design leaves no base layer.
    pub fn build(&mut self, design: &Design) -> Result<Composite> {
        design.validate()?;

        let plans = {
            let mut sketch = Sketch::new(&mut self.outliner, &mut self.cache, &self.config);
            design.plan(&mut sketch)?
        };
        let composite = self.assemble(plans)?;
        if composite.solid(LayerKind::Base).is_none() {
            return Err(BuildError::EmptyLayer(LayerKind::Base.to_string()).into());
        }

        info!(
            design = design.name(),
            solids = composite.solids().len(),
            triangles = composite.triangle_count(),
            "built composite"
        );
        Ok(composite)
    }
}
