use ndarray::{s, Array3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::buffer::PixelBuffer;
use crate::consts::BOOST_CHANNEL;
use crate::error::{CropError, Result};

/// A caller-supplied rectangle that biases the search toward covering it,
/// e.g. a detected face. Coordinates are in source pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoostRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Strength in [0, 1]; contributes `weight * 255` to the boost channel.
    pub weight: f64,
}

impl BoostRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64, weight: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            weight,
        }
    }

    /// Reject non-finite geometry, negative sizes and weights outside [0, 1].
    pub fn validated(self) -> Result<Self> {
        let geometry = [self.x, self.y, self.width, self.height];
        if geometry.iter().any(|v| !v.is_finite()) {
            return Err(CropError::InvalidBoost(format!(
                "non-finite geometry {:?}",
                geometry
            )));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(CropError::InvalidBoost(format!(
                "negative size {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(CropError::InvalidBoost(format!(
                "weight {} outside [0, 1]",
                self.weight
            )));
        }
        Ok(self)
    }

    /// Geometry multiplied by `factor` and truncated to whole pixels; weight unchanged.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: (self.x * factor).trunc(),
            y: (self.y * factor).trunc(),
            width: (self.width * factor).trunc(),
            height: (self.height * factor).trunc(),
            weight: self.weight,
        }
    }
}

/// Anything that can supply boost regions for an image (face detectors,
/// saliency models, manual annotations).
pub trait BoostSource {
    fn boosts(&self, image: &PixelBuffer) -> Result<Vec<BoostRegion>>;
}

/// A fixed list of regions, independent of the image content.
#[derive(Clone, Debug, Default)]
pub struct StaticBoosts(pub Vec<BoostRegion>);

impl BoostSource for StaticBoosts {
    fn boosts(&self, _image: &PixelBuffer) -> Result<Vec<BoostRegion>> {
        Ok(self.0.clone())
    }
}

/// Add every region's weight to the boost channel of a `(h, w, 4)` map.
///
/// Regions are truncated to integer pixel bounds and clipped to the map;
/// the channel saturates at 255.
pub(crate) fn apply_boosts(data: &mut Array3<u8>, boosts: &[BoostRegion]) {
    let (h, w, _) = data.dim();
    for boost in boosts {
        let x0 = clip(boost.x.trunc(), w);
        let x1 = clip((boost.x + boost.width).trunc(), w);
        let y0 = clip(boost.y.trunc(), h);
        let y1 = clip((boost.y + boost.height).trunc(), h);
        if x0 >= x1 || y0 >= y1 {
            warn!(?boost, "Boost region lies outside the image, ignored");
            continue;
        }

        let add = (boost.weight * 255.0).round().clamp(0.0, 255.0) as u8;
        data.slice_mut(s![y0..y1, x0..x1, BOOST_CHANNEL])
            .mapv_inplace(|v| v.saturating_add(add));
    }
}

fn clip(v: f64, limit: usize) -> usize {
    v.max(0.0).min(limit as f64) as usize
}
