use tracing::debug;

use crate::error::{CropError, Result};

use super::constraints::RatioConstraints;

/// Crop size the search should aim for.
#[derive(Clone, Debug, PartialEq)]
pub struct CropTarget {
    /// Target width: `fitted_width * min_scale`.
    pub width: f64,
    pub height: f64,
    /// In `[min_scale_threshold, 1]`.
    pub min_scale: f64,
    /// Source aspect ratio already equals `crop_ratio`.
    pub perfect_ratio: bool,
    pub crop_ratio: f64,
    /// Largest rectangle of `crop_ratio` inside the source.
    pub fitted_width: f64,
    pub fitted_height: f64,
}

impl CropTarget {
    /// Only the fitted rectangle itself is a valid crop, so scoring cannot
    /// change the outcome.
    pub fn skips_search(&self) -> bool {
        self.min_scale == 1.0 && self.perfect_ratio
    }

    /// A target that rounds to zero pixels in either dimension.
    pub fn is_empty(&self) -> bool {
        !(self.width >= 1.0 && self.height >= 1.0)
    }
}

/// Turn ratio and size constraints into the crop target for a
/// `source_width x source_height` image.
///
/// With no ratio given (and no `min_width`/`min_height` pair to derive one)
/// the crop ratio falls back to the image's own ratio.
pub fn compute_target(
    source_width: u32,
    source_height: u32,
    constraints: &RatioConstraints,
) -> Result<CropTarget> {
    if source_width == 0 || source_height == 0 {
        return Err(CropError::InvalidDimensions {
            width: source_width,
            height: source_height,
        });
    }
    constraints.validate()?;

    let (src_w, src_h) = (source_width as f64, source_height as f64);
    let image_ratio = src_w / src_h;

    let min_ratio = constraints
        .min_ratio
        .or(match (constraints.min_width, constraints.min_height) {
            (Some(w), Some(h)) => Some(w / h),
            _ => None,
        });

    let crop_ratio = match (constraints.max_ratio, min_ratio) {
        (Some(max), Some(min)) => image_ratio.min(max).max(min),
        (Some(max), None) => image_ratio.min(max),
        (None, Some(min)) => min,
        (None, None) => image_ratio,
    };
    let perfect_ratio = image_ratio == crop_ratio;

    let mut fitted_width = src_w;
    let mut fitted_height = fitted_width / crop_ratio;
    if fitted_height > src_h {
        fitted_width = src_h * crop_ratio;
        fitted_height = src_h;
    }

    // A lone minimum dimension implies the other through the crop ratio.
    let min_size = match (constraints.min_width, constraints.min_height) {
        (Some(w), Some(h)) => Some((w, h)),
        (Some(w), None) => Some((w, w / crop_ratio)),
        (None, Some(h)) => Some((h * crop_ratio, h)),
        (None, None) => None,
    };
    let min_scale = constraints.min_scale.or_else(|| {
        min_size.map(|(min_w, min_h)| (min_w / src_w).min(min_h / src_h).min(1.0))
    });

    let min_scale = match min_scale {
        Some(s) => s.max(constraints.min_scale_threshold).min(1.0),
        None => 1.0,
    };

    let target = CropTarget {
        width: fitted_width * min_scale,
        height: fitted_height * min_scale,
        min_scale,
        perfect_ratio,
        crop_ratio,
        fitted_width,
        fitted_height,
    };
    debug!(?target, image_ratio, "Computed crop target");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_wide_image_clamped_to_max_ratio() {
        let t = compute_target(1000, 500, &RatioConstraints::range(1.0, 1.5)).unwrap();
        assert_eq!(t.crop_ratio, 1.5);
        assert!(!t.perfect_ratio);
        assert_relative_eq!(t.fitted_width, 750.0);
        assert_relative_eq!(t.fitted_height, 500.0);
        assert_eq!(t.min_scale, 1.0);
        assert!(!t.skips_search());
    }

    #[test]
    fn test_ratio_within_range_is_perfect() {
        let t = compute_target(1200, 1000, &RatioConstraints::range(1.0, 1.5)).unwrap();
        assert!(t.perfect_ratio);
        assert!(t.skips_search());
        assert_relative_eq!(t.width, 1200.0);
        assert_relative_eq!(t.height, 1000.0);
    }

    #[test]
    fn test_ratio_from_min_size() {
        let c = RatioConstraints {
            min_width: Some(400.0),
            min_height: Some(200.0),
            ..RatioConstraints::default()
        };
        let t = compute_target(1000, 1000, &c).unwrap();
        assert_eq!(t.crop_ratio, 2.0);
        assert_relative_eq!(t.fitted_width, 1000.0);
        assert_relative_eq!(t.fitted_height, 500.0);
        // min(400/1000, 200/1000) = 0.2, floored to the 0.5 threshold.
        assert_eq!(t.min_scale, 0.5);
        assert_relative_eq!(t.width, 500.0);
        assert_relative_eq!(t.height, 250.0);
    }

    #[test]
    fn test_missing_min_height_derived_from_ratio() {
        let c = RatioConstraints {
            min_ratio: Some(1.0),
            min_width: Some(800.0),
            ..RatioConstraints::default()
        };
        let t = compute_target(1000, 1000, &c).unwrap();
        assert_relative_eq!(t.min_scale, 0.8);
        assert_relative_eq!(t.width, 800.0);
    }

    #[test]
    fn test_explicit_min_scale_respects_threshold() {
        let c = RatioConstraints {
            min_ratio: Some(1.0),
            min_scale: Some(0.3),
            ..RatioConstraints::default()
        };
        let t = compute_target(100, 100, &c).unwrap();
        assert_eq!(t.min_scale, 0.5);
        assert!(!t.skips_search());
    }

    #[test]
    fn test_zero_source_rejected() {
        assert!(matches!(
            compute_target(0, 10, &RatioConstraints::default()),
            Err(CropError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_tall_image_fits_by_height() {
        let t = compute_target(400, 1000, &RatioConstraints::fixed(1.0)).unwrap();
        assert_relative_eq!(t.fitted_width, 400.0);
        assert_relative_eq!(t.fitted_height, 400.0);
    }
}
