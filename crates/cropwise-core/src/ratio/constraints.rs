use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MIN_SCALE_THRESHOLD;
use crate::error::{CropError, Result};

/// Aspect-ratio and minimum-size limits on the suggested crop.
///
/// Ratios are width / height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioConstraints {
    pub min_ratio: Option<f64>,
    pub max_ratio: Option<f64>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    /// Smallest allowed crop as a fraction of the largest fitted rectangle.
    pub min_scale: Option<f64>,
    /// Floor applied to `min_scale`.
    pub min_scale_threshold: f64,
}

impl Default for RatioConstraints {
    fn default() -> Self {
        Self {
            min_ratio: None,
            max_ratio: None,
            min_width: None,
            min_height: None,
            min_scale: None,
            min_scale_threshold: DEFAULT_MIN_SCALE_THRESHOLD,
        }
    }
}

impl RatioConstraints {
    /// A single fixed aspect ratio.
    pub fn fixed(ratio: f64) -> Self {
        Self {
            min_ratio: Some(ratio),
            ..Self::default()
        }
    }

    /// Any aspect ratio in `[min, max]`.
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min_ratio: Some(min),
            max_ratio: Some(max),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("min_ratio", self.min_ratio),
            ("max_ratio", self.max_ratio),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("min_scale", self.min_scale),
        ];
        for (name, value) in positive {
            if let Some(v) = value {
                if !(v > 0.0 && v.is_finite()) {
                    return Err(CropError::InvalidOptions(format!(
                        "{name} must be positive, got {v}"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_ratio, self.max_ratio) {
            if min > max {
                return Err(CropError::InvalidOptions(format!(
                    "min_ratio {min} exceeds max_ratio {max}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.min_scale_threshold) {
            return Err(CropError::InvalidOptions(format!(
                "min_scale_threshold {} outside [0, 1]",
                self.min_scale_threshold
            )));
        }
        Ok(())
    }
}

/// Caller-facing option names, as a crop widget would receive them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallerOptions {
    pub min_scale: Option<f64>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub aspect_ratio: Option<f64>,
    pub max_aspect_ratio: Option<f64>,
    pub min_scale_threshold: Option<f64>,
}

impl From<&CallerOptions> for RatioConstraints {
    fn from(o: &CallerOptions) -> Self {
        Self {
            min_ratio: o.aspect_ratio,
            max_ratio: o.max_aspect_ratio,
            min_width: o.min_width,
            min_height: o.min_height,
            // Zero means unset; the scale then comes from the minimum size.
            min_scale: o.min_scale.filter(|s| *s != 0.0),
            min_scale_threshold: o
                .min_scale_threshold
                .unwrap_or(DEFAULT_MIN_SCALE_THRESHOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_options_mapping() {
        let opts = CallerOptions {
            aspect_ratio: Some(1.0),
            max_aspect_ratio: Some(1.5),
            min_width: Some(200.0),
            ..CallerOptions::default()
        };
        let c = RatioConstraints::from(&opts);
        assert_eq!(c.min_ratio, Some(1.0));
        assert_eq!(c.max_ratio, Some(1.5));
        assert_eq!(c.min_width, Some(200.0));
        assert_eq!(c.min_scale_threshold, DEFAULT_MIN_SCALE_THRESHOLD);
    }

    #[test]
    fn test_zero_min_scale_is_unset() {
        let opts = CallerOptions {
            aspect_ratio: Some(1.0),
            min_scale: Some(0.0),
            min_width: Some(800.0),
            ..CallerOptions::default()
        };
        let c = RatioConstraints::from(&opts);
        assert_eq!(c.min_scale, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        assert!(RatioConstraints::range(2.0, 1.0).validate().is_err());
        assert!(RatioConstraints::range(1.0, 2.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_size() {
        let c = RatioConstraints {
            min_width: Some(-3.0),
            ..RatioConstraints::default()
        };
        assert!(c.validate().is_err());
    }
}
