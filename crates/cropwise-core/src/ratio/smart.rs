use std::path::Path;

use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::color::{average_color, ColorAlgorithm};
use crate::consts::DEFAULT_NEUTRAL_COLOR;
use crate::error::Result;
use crate::features::{BoostRegion, BoostSource};
use crate::io::{CropRect, ImageCrateOps, ImageOperations};
use crate::search::{crop, SearchOptions};

use super::constraints::{CallerOptions, RatioConstraints};
use super::target::compute_target;

/// Units of the rectangle handed to a [`CropSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueMode {
    /// Pixels of the original image.
    Real,
    /// Fractions of the image size.
    Ratio,
    /// Pixels of whatever the sink displays.
    Raw,
}

/// Receiver of the suggested crop, typically an interactive crop widget.
pub trait CropSink {
    fn set_value(&mut self, rect: CropRect, constrain: bool, mode: ValueMode);
}

impl<F> CropSink for F
where
    F: FnMut(CropRect, bool, ValueMode),
{
    fn set_value(&mut self, rect: CropRect, constrain: bool, mode: ValueMode) {
        (*self)(rect, constrain, mode)
    }
}

pub type CropCallback = Box<dyn FnMut(CropRect) + Send>;

/// Suggests a crop satisfying [`RatioConstraints`], using the content-aware
/// search only when more than one crop is possible.
pub struct SmartCropper {
    constraints: RatioConstraints,
    search: SearchOptions,
    ops: Box<dyn ImageOperations>,
    boost_source: Option<Box<dyn BoostSource + Send + Sync>>,
    color_algorithm: ColorAlgorithm,
    on_smart_crop_done: Option<CropCallback>,
}

impl SmartCropper {
    pub fn new(constraints: RatioConstraints) -> Self {
        Self {
            constraints,
            search: SearchOptions::default(),
            ops: Box::new(ImageCrateOps::default()),
            boost_source: None,
            color_algorithm: ColorAlgorithm::default(),
            on_smart_crop_done: None,
        }
    }

    pub fn from_caller_options(options: &CallerOptions) -> Self {
        Self::new(RatioConstraints::from(options))
    }

    /// Base engine options; size and scale fields are overwritten per image.
    pub fn with_search_options(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn with_ops(mut self, ops: Box<dyn ImageOperations>) -> Self {
        self.ops = ops;
        self
    }

    pub fn with_boost_source(mut self, source: Box<dyn BoostSource + Send + Sync>) -> Self {
        self.boost_source = Some(source);
        self
    }

    pub fn with_color_algorithm(mut self, algorithm: ColorAlgorithm) -> Self {
        self.color_algorithm = algorithm;
        self
    }

    /// Register a callback that receives a copy of every applied crop.
    pub fn on_smart_crop_done(mut self, callback: CropCallback) -> Self {
        self.on_smart_crop_done = Some(callback);
        self
    }

    /// Compute the suggested crop without notifying anyone.
    ///
    /// Returns `Ok(None)` when the target collapses to zero pixels or no
    /// candidate fits.
    pub fn suggest(&self, image: &PixelBuffer) -> Result<Option<CropRect>> {
        let target = compute_target(image.width(), image.height(), &self.constraints)?;
        if target.is_empty() {
            warn!(
                width = target.width,
                height = target.height,
                "Crop target is empty, keeping current selection"
            );
            return Ok(None);
        }

        if target.skips_search() {
            let rect = CropRect::new(
                0,
                0,
                target.fitted_width as u32,
                target.fitted_height as u32,
            );
            info!(
                width = rect.width,
                height = rect.height,
                "Image already matches the crop ratio, skipping search"
            );
            return Ok(Some(rect));
        }

        let mut opts = self.search.clone();
        opts.width = Some(target.width);
        opts.height = Some(target.height);
        opts.aspect = None;
        opts.min_scale = target.min_scale;
        opts.max_scale = 1.0;
        opts.boost.extend(self.detected_boosts(image));

        let result = crop(image, &opts, self.ops.as_ref())?;
        Ok(result
            .top_rect()
            .map(|r| r.clamped(image.width(), image.height())))
    }

    /// Suggest a crop for `image` and hand it to `sink` and the callback.
    pub fn apply(
        &mut self,
        image: &PixelBuffer,
        sink: &mut dyn CropSink,
    ) -> Result<Option<CropRect>> {
        let rect = self.suggest(image)?;
        if let Some(rect) = rect {
            sink.set_value(rect, true, ValueMode::Real);
            if let Some(callback) = self.on_smart_crop_done.as_mut() {
                callback(rect);
            }
        }
        Ok(rect)
    }

    /// Open `source` through the configured backend, then [`apply`](Self::apply).
    pub fn apply_path(
        &mut self,
        source: &Path,
        sink: &mut dyn CropSink,
    ) -> Result<Option<CropRect>> {
        let image = self.ops.open(source)?;
        debug!(
            path = %source.display(),
            width = image.width(),
            height = image.height(),
            "Opened image"
        );
        self.apply(&image, sink)
    }

    /// Average colour of `source`, or the neutral colour if it cannot be read.
    pub fn background_color(&self, source: &Path) -> [u8; 4] {
        match self.ops.open(source) {
            Ok(image) => average_color(&image, self.color_algorithm),
            Err(e) => {
                warn!(
                    path = %source.display(),
                    error = %e,
                    "Could not read image for background colour"
                );
                DEFAULT_NEUTRAL_COLOR
            }
        }
    }

    fn detected_boosts(&self, image: &PixelBuffer) -> Vec<BoostRegion> {
        let Some(source) = &self.boost_source else {
            return Vec::new();
        };
        match source.boosts(image) {
            Ok(regions) => regions
                .into_iter()
                .filter_map(|r| match r.validated() {
                    Ok(r) => Some(r),
                    Err(e) => {
                        warn!(error = %e, "Dropping boost region");
                        None
                    }
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "Boost source failed, continuing without boosts");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::CropError;
    use crate::features::StaticBoosts;

    struct FailingBoosts;

    impl BoostSource for FailingBoosts {
        fn boosts(&self, _image: &PixelBuffer) -> Result<Vec<BoostRegion>> {
            Err(CropError::InvalidBoost("detector unavailable".into()))
        }
    }

    fn gray(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::filled(w, h, [120, 120, 120, 255]).unwrap()
    }

    #[test]
    fn test_skip_path_notifies_sink_and_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);
        let mut cropper = SmartCropper::new(RatioConstraints::range(1.0, 1.5))
            .on_smart_crop_done(Box::new(move |r| seen_cb.lock().unwrap().push(r)));

        let mut sunk = Vec::new();
        let mut sink = |r: CropRect, constrain: bool, mode: ValueMode| sunk.push((r, constrain, mode));
        let rect = cropper.apply(&gray(60, 50), &mut sink).unwrap().unwrap();

        assert_eq!(rect, CropRect::new(0, 0, 60, 50));
        assert_eq!(sunk, vec![(rect, true, ValueMode::Real)]);
        assert_eq!(*seen.lock().unwrap(), vec![rect]);
    }

    #[test]
    fn test_empty_target_yields_no_crop() {
        // Fitted 1x1, halved by the threshold.
        let cropper = SmartCropper::new(RatioConstraints {
            min_ratio: Some(1.0),
            min_scale: Some(0.1),
            ..RatioConstraints::default()
        });
        assert_eq!(cropper.suggest(&gray(1, 40)).unwrap(), None);
    }

    #[test]
    fn test_search_path_respects_ratio() {
        let cropper = SmartCropper::new(RatioConstraints::fixed(1.0));
        let rect = cropper.suggest(&gray(80, 40)).unwrap().unwrap();
        assert_eq!((rect.width, rect.height), (40, 40));
        assert_eq!(rect.y, 0);
        assert!(rect.x + rect.width <= 80);
    }

    #[test]
    fn test_failing_boost_source_is_not_fatal() {
        let cropper = SmartCropper::new(RatioConstraints::fixed(1.0))
            .with_boost_source(Box::new(FailingBoosts));
        assert!(cropper.suggest(&gray(80, 40)).unwrap().is_some());
    }

    #[test]
    fn test_invalid_boost_regions_dropped() {
        let cropper = SmartCropper::new(RatioConstraints::fixed(1.0)).with_boost_source(Box::new(
            StaticBoosts(vec![BoostRegion::new(0.0, 0.0, 10.0, 10.0, 7.0)]),
        ));
        assert!(cropper.detected_boosts(&gray(20, 20)).is_empty());
    }

    #[test]
    fn test_background_color_falls_back_on_missing_file() {
        let cropper = SmartCropper::new(RatioConstraints::default());
        let color = cropper.background_color(Path::new("/nonexistent/cropwise/input.png"));
        assert_eq!(color, DEFAULT_NEUTRAL_COLOR);
    }
}
