//! Fixed constants and tunable build parameters.

/// Factor applied to millimetre coordinates before they enter the polygon
/// engine. Three decimal places survive every boolean operation.
pub const SCALE: f64 = 1000.0;

/// Vertices closer than this (in millimetres) are merged on export.
pub const WELD_TOLERANCE: f64 = 1e-3;

/// Length of the binary STL header.
pub const STL_HEADER_LEN: usize = 80;

/// Header plus the little-endian triangle count.
pub const STL_MIN_LEN: usize = STL_HEADER_LEN + 4;

/// Normal, three vertices and the attribute word.
pub const STL_TRIANGLE_LEN: usize = 50;

/// A keyring hole is always at least this much smaller than its disc.
pub const KEYRING_HOLE_MARGIN: f64 = 0.1;

/// Smallest keyring disc radius accepted; smaller requests are raised to it.
pub const MIN_KEYRING_RADIUS: f64 = 0.5;

/// Side of the stand-in footprint used when text yields no outline, as a
/// fraction of the font size.
pub const PLACEHOLDER_EM: f64 = 0.6;

/// Depth by which a stacked layer sinks into the one beneath it.
///
/// Tuned against the prism extruder and the export weld tolerance; coplanar
/// contact produces zero-thickness shared faces.
pub const DEFAULT_EMBED: f64 = 0.05;

/// Parameters controlling curve flattening and layer stacking.
#[derive(Debug, Clone, Copy)]
pub struct BuildConfig {
    /// Maximum chord deviation for circles and round offset joins, in millimetres.
    pub arc_tolerance: f64,
    /// Minimum number of segments for a full circle.
    pub min_segments: usize,
    /// Maximum number of segments for a full circle.
    pub max_segments: usize,
    /// Vertical overlap between stacked layers, in millimetres.
    pub embed: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            arc_tolerance: 0.01,
            min_segments: 12,
            max_segments: 128,
            embed: DEFAULT_EMBED,
        }
    }
}

impl BuildConfig {
    /// Number of segments used to flatten a full circle of `radius`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn circle_segments(&self, radius: f64) -> usize {
        if radius <= self.arc_tolerance || self.arc_tolerance <= 0.0 {
            return self.min_segments;
        }
        let half_angle = (1.0 - self.arc_tolerance / radius).acos();
        let n = (std::f64::consts::PI / half_angle).ceil() as usize;
        n.clamp(self.min_segments, self.max_segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stl_sizes_are_consistent() {
        assert_eq!(STL_MIN_LEN, 84);
        assert_eq!(STL_TRIANGLE_LEN, 12 + 36 + 2);
    }

    #[test]
    fn circle_segments_grow_with_radius() {
        let config = BuildConfig::default();
        let small = config.circle_segments(1.0);
        let large = config.circle_segments(20.0);
        assert!(small >= config.min_segments);
        assert!(large >= small);
        assert!(large <= config.max_segments);
    }

    #[test]
    fn circle_segments_tiny_radius_uses_minimum() {
        let config = BuildConfig::default();
        assert_eq!(config.circle_segments(0.001), config.min_segments);
    }
}
