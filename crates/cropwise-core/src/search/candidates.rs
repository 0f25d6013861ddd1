use serde::{Deserialize, Serialize};

use crate::consts::SCALE_EPSILON;

use super::options::SearchOptions;
use super::score::Score;

/// One axis-aligned rectangle considered as a crop, in search-space pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Candidate {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies in `[x, x + width) x [y, y + height)`.
    #[inline]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A candidate together with its score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredCrop {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: Score,
}

/// Enumerate candidates over the scale x position grid of a `width x height` image.
///
/// Order: scale descending from `max_scale` to `min_scale` (both inclusive),
/// then `y` ascending, then `x` ascending. Without an explicit crop size the
/// crop is a square of the image's smaller dimension.
pub fn generate_crops(opts: &SearchOptions, width: u32, height: u32) -> Vec<Candidate> {
    let (width, height) = (width as f64, height as f64);
    let min_dimension = width.min(height);
    let crop_width = opts
        .crop_width
        .filter(|v| *v > 0.0)
        .unwrap_or(min_dimension);
    let crop_height = opts
        .crop_height
        .filter(|v| *v > 0.0)
        .unwrap_or(min_dimension);
    let step = opts.step.max(1) as f64;

    let mut results = Vec::new();
    for scale in scales(opts.max_scale, opts.min_scale, opts.scale_step) {
        let (cw, ch) = (crop_width * scale, crop_height * scale);
        let mut y = 0.0;
        while y + ch <= height {
            let mut x = 0.0;
            while x + cw <= width {
                results.push(Candidate::new(x, y, cw, ch));
                x += step;
            }
            y += step;
        }
    }
    results
}

/// Scales from `max` down to `min` in `step` decrements, keeping `min` reachable
/// despite floating-point drift.
fn scales(max: f64, min: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && max >= min {
        ((max - min) / step + SCALE_EPSILON).floor() as usize + 1
    } else if max >= min {
        1
    } else {
        0
    };
    (0..count).map(move |i| max - i as f64 * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(crop: Option<(f64, f64)>, min_scale: f64, max_scale: f64) -> SearchOptions {
        SearchOptions {
            crop_width: crop.map(|c| c.0),
            crop_height: crop.map(|c| c.1),
            min_scale,
            max_scale,
            ..SearchOptions::default()
        }
    }

    #[test]
    fn test_full_size_single_candidate() {
        let crops = generate_crops(&opts(Some((8.0, 8.0)), 1.0, 1.0), 8, 8);
        assert_eq!(crops, vec![Candidate::new(0.0, 0.0, 8.0, 8.0)]);
    }

    #[test]
    fn test_square_fallback_without_crop_size() {
        let crops = generate_crops(&opts(None, 1.0, 1.0), 24, 8);
        assert_eq!(crops.len(), 3);
        assert!(crops.iter().all(|c| c.width == 8.0 && c.height == 8.0));
        assert_eq!(crops[2].x, 16.0);
    }

    #[test]
    fn test_enumeration_order() {
        let crops = generate_crops(&opts(Some((8.0, 8.0)), 1.0, 1.0), 16, 16);
        let positions: Vec<(f64, f64)> = crops.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            positions,
            vec![(0.0, 0.0), (8.0, 0.0), (0.0, 8.0), (8.0, 8.0)]
        );
    }

    #[test]
    fn test_scale_range_inclusive_and_descending() {
        let crops = generate_crops(&opts(Some((10.0, 10.0)), 0.7, 1.0), 10, 10);
        let mut scales: Vec<f64> = crops.iter().map(|c| c.width / 10.0).collect();
        scales.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        assert_eq!(scales.len(), 4);
        assert!((scales[0] - 1.0).abs() < 1e-9);
        assert!((scales[3] - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_crop_yields_nothing() {
        let crops = generate_crops(&opts(Some((20.0, 5.0)), 1.0, 1.0), 10, 10);
        assert!(crops.is_empty());
    }

    #[test]
    fn test_contains_half_open() {
        let c = Candidate::new(2.0, 2.0, 4.0, 4.0);
        assert!(c.contains(2.0, 5.9));
        assert!(!c.contains(6.0, 3.0));
        assert!(!c.contains(1.9, 3.0));
    }
}
