use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::consts::PARALLEL_CANDIDATE_THRESHOLD;
use crate::error::Result;
use crate::features::{build_feature_map, down_sample, FeatureMap};
use crate::io::crop::CropRect;
use crate::io::image_ops::ImageOperations;

use super::candidates::{generate_crops, Candidate, ScoredCrop};
use super::options::SearchOptions;
use super::score::{score, Score};

/// Outcome of a crop search. Coordinates are in the original image space.
#[derive(Clone, Debug, Default)]
pub struct SearchResult {
    /// Best candidate, or `None` when no candidate fit the image.
    pub top_crop: Option<ScoredCrop>,
    /// Every scored candidate in enumeration order (debug mode only).
    pub crops: Option<Vec<ScoredCrop>>,
    /// Full-resolution feature map of the searched image (debug mode only).
    pub feature_map: Option<FeatureMap>,
    /// Factor the image was resampled by before the search (1.0 if not).
    pub prescale: f64,
}

impl SearchResult {
    /// The best crop as an integer rectangle.
    pub fn top_rect(&self) -> Option<CropRect> {
        self.top_crop.as_ref().map(|c| CropRect::from(&c.candidate))
    }
}

/// Result of [`analyse`], in the coordinates of the analysed image.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub top_crop: Option<ScoredCrop>,
    pub crops: Vec<ScoredCrop>,
    pub feature_map: FeatureMap,
}

/// Find the crop of `image` that best preserves its interesting content.
///
/// Resolves the crop size from `opts.width`/`opts.height` (or `opts.aspect`),
/// optionally prescales the image through `ops` to bound the cost, runs
/// [`analyse`] and maps the winning rectangle back to source coordinates.
pub fn crop(
    image: &PixelBuffer,
    opts: &SearchOptions,
    ops: &dyn ImageOperations,
) -> Result<SearchResult> {
    opts.validate()?;
    let mut opts = opts.clone();
    let (src_w, src_h) = (image.width() as f64, image.height() as f64);

    if let Some((target_w, target_h)) = opts.target_size() {
        let scale = (src_w / target_w).min(src_h / target_h);
        opts.crop_width = Some((target_w * scale).floor());
        opts.crop_height = Some((target_h * scale).floor());
        // Never pick a crop that would need upscaling to reach the target size.
        opts.min_scale = opts.max_scale.min((1.0 / scale).max(opts.min_scale));
        debug!(
            scale,
            crop_width = ?opts.crop_width,
            crop_height = ?opts.crop_height,
            min_scale = opts.min_scale,
            "Resolved crop size"
        );
    }

    let mut prescale = 1.0;
    let resampled;
    let mut searched = image;
    if opts.prescale {
        let factor = (opts.prescale_target / src_w)
            .max(opts.prescale_target / src_h)
            .min(1.0);
        if factor < 1.0 {
            let w = ((src_w * factor) as u32).max(1);
            let h = ((src_h * factor) as u32).max(1);
            resampled = ops.resample(image, w, h)?;
            searched = &resampled;
            prescale = factor;

            opts.crop_width = opts.crop_width.map(|v| (v * factor).trunc());
            opts.crop_height = opts.crop_height.map(|v| (v * factor).trunc());
            opts.boost = opts.boost.iter().map(|b| b.scaled(factor)).collect();
            debug!(factor, width = w, height = h, "Prescaled image");
        }
    }

    let analysis = analyse(searched, &opts);
    let restore = |c: ScoredCrop| ScoredCrop {
        candidate: Candidate::new(
            (c.candidate.x / prescale).trunc(),
            (c.candidate.y / prescale).trunc(),
            (c.candidate.width / prescale).trunc(),
            (c.candidate.height / prescale).trunc(),
        ),
        score: c.score,
    };

    let top_crop = analysis.top_crop.map(restore);
    match &top_crop {
        Some(top) => info!(
            x = top.candidate.x,
            y = top.candidate.y,
            width = top.candidate.width,
            height = top.candidate.height,
            score = top.score.total,
            "Selected crop"
        ),
        None => warn!("No crop candidate fits the image"),
    }

    let (crops, feature_map) = if opts.debug {
        (
            Some(analysis.crops.into_iter().map(restore).collect()),
            Some(analysis.feature_map),
        )
    } else {
        (None, None)
    };

    Ok(SearchResult {
        top_crop,
        crops,
        feature_map,
        prescale,
    })
}

/// Build the feature map of `image`, score every candidate and pick the best.
///
/// `opts.crop_width`/`crop_height` are used as-is; no prescaling happens here.
pub fn analyse(image: &PixelBuffer, opts: &SearchOptions) -> Analysis {
    let feature_map = build_feature_map(image, &opts.detection, &opts.boost);
    let score_map = down_sample(&feature_map, opts.score_down_sample as usize);
    let candidates = generate_crops(opts, image.width(), image.height());
    debug!(
        candidates = candidates.len(),
        map_width = score_map.width(),
        map_height = score_map.height(),
        "Scoring candidates"
    );

    let scores: Vec<Score> = if candidates.len() >= PARALLEL_CANDIDATE_THRESHOLD {
        candidates
            .par_iter()
            .map(|c| score(opts, &score_map, c))
            .collect()
    } else {
        candidates
            .iter()
            .map(|c| score(opts, &score_map, c))
            .collect()
    };

    let crops: Vec<ScoredCrop> = candidates
        .into_iter()
        .zip(scores)
        .map(|(candidate, score)| ScoredCrop { candidate, score })
        .collect();

    Analysis {
        top_crop: best_crop(&crops).cloned(),
        crops,
        feature_map,
    }
}

/// First candidate with the strictly greatest total.
pub fn best_crop(crops: &[ScoredCrop]) -> Option<&ScoredCrop> {
    let mut best: Option<&ScoredCrop> = None;
    let mut top = f64::NEG_INFINITY;
    for c in crops {
        if c.score.total > top {
            top = c.score.total;
            best = Some(c);
        }
    }
    best
}
