//! Per-pixel feature extraction.
//!
//! A [`FeatureMap`] stores four 8-bit channels per pixel: skin (R),
//! detail/edge (G), saturation (B) and caller boost (A). The map is built
//! once per search and reduced with [`down_sample`] before scoring.

pub mod boost;
pub mod detect;
pub mod downsample;
pub mod map;

pub use boost::{BoostRegion, BoostSource, StaticBoosts};
pub use detect::DetectionThresholds;
pub use downsample::down_sample;
pub use map::{build_feature_map, FeatureMap};

/// Round and saturate to the 0..=255 range of an 8-bit channel.
#[inline]
pub(crate) fn clamp_u8(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}
