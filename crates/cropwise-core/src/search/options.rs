use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BOOST_WEIGHT, DEFAULT_DETAIL_WEIGHT, DEFAULT_EDGE_RADIUS, DEFAULT_EDGE_WEIGHT,
    DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_OUTSIDE_IMPORTANCE, DEFAULT_PRESCALE_TARGET,
    DEFAULT_SATURATION_BIAS, DEFAULT_SATURATION_WEIGHT, DEFAULT_SCALE_STEP,
    DEFAULT_SCORE_DOWN_SAMPLE, DEFAULT_SKIN_BIAS, DEFAULT_SKIN_WEIGHT, DEFAULT_STEP,
};
use crate::error::{CropError, Result};
use crate::features::{BoostRegion, DetectionThresholds};

/// How much each feature channel contributes to a candidate's total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub detail: f64,
    pub skin: f64,
    pub saturation: f64,
    pub boost: f64,
    /// Added to the detail value before it multiplies the skin channel.
    pub skin_bias: f64,
    /// Added to the detail value before it multiplies the saturation channel.
    pub saturation_bias: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            detail: DEFAULT_DETAIL_WEIGHT,
            skin: DEFAULT_SKIN_WEIGHT,
            saturation: DEFAULT_SATURATION_WEIGHT,
            boost: DEFAULT_BOOST_WEIGHT,
            skin_bias: DEFAULT_SKIN_BIAS,
            saturation_bias: DEFAULT_SATURATION_BIAS,
        }
    }
}

/// Parameters of the spatial importance function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceParams {
    /// Multiplier of the squared edge overflow; negative to penalize borders.
    pub edge_weight: f64,
    pub edge_radius: f64,
    /// Importance of samples outside the candidate.
    pub outside_importance: f64,
    pub rule_of_thirds: bool,
}

impl Default for ImportanceParams {
    fn default() -> Self {
        Self {
            edge_weight: DEFAULT_EDGE_WEIGHT,
            edge_radius: DEFAULT_EDGE_RADIUS,
            outside_importance: DEFAULT_OUTSIDE_IMPORTANCE,
            rule_of_thirds: true,
        }
    }
}

/// Configuration of a single crop search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Requested output width; with `height` this fixes the crop aspect ratio.
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Shorthand for `width = aspect, height = 1`.
    pub aspect: Option<f64>,
    /// Crop size in search space. Derived by the engine from `width`/`height`.
    #[serde(skip)]
    pub crop_width: Option<f64>,
    #[serde(skip)]
    pub crop_height: Option<f64>,
    pub min_scale: f64,
    pub max_scale: f64,
    pub scale_step: f64,
    /// Position stride in pixels.
    pub step: u32,
    /// Block size of the scoring map.
    pub score_down_sample: u32,
    pub prescale: bool,
    pub prescale_target: f64,
    /// Keep every scored candidate and the feature map in the result.
    pub debug: bool,
    pub weights: ScoreWeights,
    pub importance: ImportanceParams,
    pub detection: DetectionThresholds,
    pub boost: Vec<BoostRegion>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            aspect: None,
            crop_width: None,
            crop_height: None,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            scale_step: DEFAULT_SCALE_STEP,
            step: DEFAULT_STEP,
            score_down_sample: DEFAULT_SCORE_DOWN_SAMPLE,
            weights: ScoreWeights::default(),
            importance: ImportanceParams::default(),
            detection: DetectionThresholds::default(),
            prescale: true,
            prescale_target: DEFAULT_PRESCALE_TARGET,
            debug: false,
            boost: Vec::new(),
        }
    }
}

impl SearchOptions {
    /// Options targeting an output of `width x height`.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Target width and height, with `aspect` taking precedence.
    pub fn target_size(&self) -> Option<(f64, f64)> {
        if let Some(aspect) = self.aspect {
            return Some((aspect, 1.0));
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some((w, h)),
            _ => None,
        }
    }

    /// Check ranges before a search is started.
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(CropError::InvalidOptions("step must be > 0".into()));
        }
        if self.score_down_sample == 0 {
            return Err(CropError::InvalidOptions(
                "score_down_sample must be > 0".into(),
            ));
        }
        if !(self.scale_step > 0.0) {
            return Err(CropError::InvalidOptions(format!(
                "scale_step must be > 0, got {}",
                self.scale_step
            )));
        }
        if !(self.min_scale > 0.0) || self.min_scale > self.max_scale {
            return Err(CropError::InvalidOptions(format!(
                "scale range [{}, {}] is empty",
                self.min_scale, self.max_scale
            )));
        }
        if let Some(aspect) = self.aspect {
            if !(aspect > 0.0 && aspect.is_finite()) {
                return Err(CropError::InvalidOptions(format!(
                    "aspect must be positive, got {aspect}"
                )));
            }
        }
        if self.prescale && !(self.prescale_target > 0.0) {
            return Err(CropError::InvalidOptions(
                "prescale_target must be > 0".into(),
            ));
        }
        for b in &self.boost {
            b.clone().validated()?;
        }
        Ok(())
    }
}
