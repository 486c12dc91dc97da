use crate::error::{BuildError, Result};
use crate::outline::GlyphOutliner;

use super::flower::FlowerKeychain;
use super::initial::InitialKeychain;
use super::keyring::KeyringParams;
use super::layers::LayerPlan;
use super::name_tag::NameTag;
use super::outline::OutlineKeychain;
use super::sketch::Sketch;

/// A complete, parameterized keychain design.
#[derive(Debug, Clone, PartialEq)]
pub enum Design {
    /// Text on a base that follows its outline.
    Outline(OutlineKeychain),
    /// Large decorative initial with smaller text on a shared base.
    Initial(InitialKeychain),
    /// Petal-shaped base with a raised center disc and text.
    Flower(FlowerKeychain),
    /// Rounded plate with a raised border frame and text.
    NameTag(NameTag),
}

impl Design {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Outline(_) => "outline keychain",
            Self::Initial(_) => "initial keychain",
            Self::Flower(_) => "flower keychain",
            Self::NameTag(_) => "name tag",
        }
    }

    #[must_use]
    pub fn keyring(&self) -> &KeyringParams {
        match self {
            Self::Outline(d) => &d.keyring,
            Self::Initial(d) => &d.keyring,
            Self::Flower(d) => &d.keyring,
            Self::NameTag(d) => &d.keyring,
        }
    }

    /// Rejects non-finite or out-of-range parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidParameter`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Outline(d) => d.validate(),
            Self::Initial(d) => d.validate(),
            Self::Flower(d) => d.validate(),
            Self::NameTag(d) => d.validate(),
        }?;
        validate_keyring(self.keyring())
    }

    pub(crate) fn plan<O: GlyphOutliner>(&self, sketch: &mut Sketch<'_, O>) -> Result<Vec<LayerPlan>> {
        match self {
            Self::Outline(d) => d.plan(sketch),
            Self::Initial(d) => d.plan(sketch),
            Self::Flower(d) => d.plan(sketch),
            Self::NameTag(d) => d.plan(sketch),
        }
    }
}

impl From<OutlineKeychain> for Design {
    fn from(d: OutlineKeychain) -> Self {
        Self::Outline(d)
    }
}

impl From<InitialKeychain> for Design {
    fn from(d: InitialKeychain) -> Self {
        Self::Initial(d)
    }
}

impl From<FlowerKeychain> for Design {
    fn from(d: FlowerKeychain) -> Self {
        Self::Flower(d)
    }
}

impl From<NameTag> for Design {
    fn from(d: NameTag) -> Self {
        Self::NameTag(d)
    }
}

fn validate_keyring(keyring: &KeyringParams) -> Result<()> {
    if !keyring.enabled {
        return Ok(());
    }
    positive("keyring.outer_radius", keyring.outer_radius)?;
    finite("keyring.hole_radius", keyring.hole_radius)?;
    finite("keyring.offset.x", keyring.offset.x)?;
    finite("keyring.offset.y", keyring.offset.y)
}

pub(crate) fn finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BuildError::InvalidParameter {
            parameter,
            value,
            reason: "must be finite",
        }
        .into())
    }
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> Result<()> {
    finite(parameter, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::InvalidParameter {
            parameter,
            value,
            reason: "must be positive",
        }
        .into())
    }
}

pub(crate) fn non_negative(parameter: &'static str, value: f64) -> Result<()> {
    finite(parameter, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(BuildError::InvalidParameter {
            parameter,
            value,
            reason: "must not be negative",
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::KeysmithError;

    #[test]
    fn rejects_nan_size() {
        let design = Design::from(OutlineKeychain {
            font_size: f64::NAN,
            ..OutlineKeychain::default()
        });
        let err = design.validate().unwrap_err();
        assert!(matches!(
            err,
            KeysmithError::Build(BuildError::InvalidParameter {
                parameter: "font_size",
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_depth() {
        let design = Design::from(NameTag {
            base_depth: -1.0,
            ..NameTag::default()
        });
        assert!(design.validate().is_err());
    }

    #[test]
    fn disabled_keyring_is_not_checked() {
        let mut design = FlowerKeychain::default();
        design.keyring.enabled = false;
        design.keyring.outer_radius = f64::NAN;
        assert!(Design::from(design).validate().is_ok());
    }

    #[test]
    fn defaults_are_valid() {
        for design in [
            Design::from(OutlineKeychain::default()),
            Design::from(InitialKeychain::default()),
            Design::from(FlowerKeychain::default()),
            Design::from(NameTag::default()),
        ] {
            assert!(design.validate().is_ok(), "{}", design.name());
        }
    }
}
