use tracing::warn;

use crate::config::{BuildConfig, KEYRING_HOLE_MARGIN, MIN_KEYRING_RADIUS};
use crate::math::{Aabb2, BoxPoint, Point2, Vector2};
use crate::polygon::Path;
use crate::primitives::circle;

/// Requested keyring attachment: a disc unioned onto the base with a
/// concentric hole cut through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyringParams {
    pub enabled: bool,
    pub outer_radius: f64,
    pub hole_radius: f64,
    /// Point of the reference bounding box the disc is centered on.
    pub anchor: BoxPoint,
    /// Displacement from the anchor point, in millimetres.
    pub offset: Vector2,
}

impl Default for KeyringParams {
    fn default() -> Self {
        Self {
            enabled: true,
            outer_radius: 4.0,
            hole_radius: 2.0,
            anchor: BoxPoint::LeftCenter,
            offset: Vector2::new(-4.0, 0.0),
        }
    }
}

impl KeyringParams {
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// A keyring resolved against a reference bounding box, radii clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyring {
    pub center: Point2,
    pub outer_radius: f64,
    /// Zero when no hole is cut.
    pub hole_radius: f64,
}

impl Keyring {
    /// Resolves `params` against `reference`, or `None` when disabled.
    ///
    /// The disc radius is raised to [`MIN_KEYRING_RADIUS`]; the hole is kept
    /// at least [`KEYRING_HOLE_MARGIN`] inside the disc.
    #[must_use]
    pub fn resolve(params: &KeyringParams, reference: &Aabb2) -> Option<Self> {
        if !params.enabled {
            return None;
        }

        let outer_radius = params.outer_radius.max(MIN_KEYRING_RADIUS);
        if outer_radius > params.outer_radius {
            warn!(
                requested = params.outer_radius,
                used = outer_radius,
                "keyring radius raised to minimum"
            );
        }

        let limit = outer_radius - KEYRING_HOLE_MARGIN;
        let hole_radius = if params.hole_radius > limit {
            warn!(
                requested = params.hole_radius,
                used = limit,
                "keyring hole clamped inside its disc"
            );
            limit
        } else {
            params.hole_radius.max(0.0)
        };

        Some(Self {
            center: reference.point(params.anchor) + params.offset,
            outer_radius,
            hole_radius,
        })
    }

    /// Disc contour, clockwise, in engine units.
    #[must_use]
    pub fn disc(&self, config: &BuildConfig) -> Path {
        Path::from_points_f64(&circle(self.center, self.outer_radius, config)).reversed()
    }

    /// Hole contour, clockwise, in engine units; `None` when no hole is cut.
    #[must_use]
    pub fn hole(&self, config: &BuildConfig) -> Option<Path> {
        (self.hole_radius > 0.0).then(|| {
            Path::from_points_f64(&circle(self.center, self.hole_radius, config)).reversed()
        })
    }
}
