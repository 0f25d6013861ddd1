//! Candidate scoring.
//!
//! Every sample of the downsampled feature map contributes to a candidate's
//! score, weighted by [`importance`]: positive near the candidate's center,
//! strongly negative near its border and mildly negative outside it. The
//! total is divided by the candidate's area so different crop sizes compare.

use serde::{Deserialize, Serialize};

use crate::consts::{IMPORTANCE_RADIAL_OFFSET, RULE_OF_THIRDS_GAIN};
use crate::features::FeatureMap;

use super::candidates::Candidate;
use super::options::{ImportanceParams, SearchOptions};

/// Per-channel accumulations and the weighted, area-normalized total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub detail: f64,
    pub skin: f64,
    pub saturation: f64,
    pub boost: f64,
    pub total: f64,
}

/// Periodic bump peaking where `x` is one third along a doubled-deviation axis.
pub fn thirds(x: f64) -> f64 {
    let x = (((x - 1.0 / 3.0 + 1.0) % 2.0) * 0.5 - 0.5) * 16.0;
    (1.0 - x * x).max(0.0)
}

/// Spatial weight of the point `(x, y)` for `crop`.
pub fn importance(params: &ImportanceParams, crop: &Candidate, x: f64, y: f64) -> f64 {
    if !crop.contains(x, y) {
        return params.outside_importance;
    }

    let nx = (x - crop.x) / crop.width;
    let ny = (y - crop.y) / crop.height;
    let px = (0.5 - nx).abs() * 2.0;
    let py = (0.5 - ny).abs() * 2.0;

    let dx = (px - 1.0 + params.edge_radius).max(0.0);
    let dy = (py - 1.0 + params.edge_radius).max(0.0);
    let d = (dx * dx + dy * dy) * params.edge_weight;

    let mut s = IMPORTANCE_RADIAL_OFFSET - (px * px + py * py).sqrt();
    if params.rule_of_thirds {
        s += (s + d + 0.5).max(0.0) * RULE_OF_THIRDS_GAIN * (thirds(px) + thirds(py));
    }
    s + d
}

/// Score `crop` against a map that was downsampled by `opts.score_down_sample`.
///
/// The map is walked in original-resolution coordinates so `crop` needs no
/// rescaling.
pub fn score(opts: &SearchOptions, map: &FeatureMap, crop: &Candidate) -> Score {
    let factor = opts.score_down_sample.max(1) as usize;
    let weights = &opts.weights;
    let mut result = Score::default();

    for row in 0..map.height() {
        let y = (row * factor) as f64;
        for col in 0..map.width() {
            let x = (col * factor) as f64;
            let [skin, detail, saturation, boost] = map.get(col, row);
            let imp = importance(&opts.importance, crop, x, y);

            let detail = detail as f64 / 255.0;
            result.skin += skin as f64 / 255.0 * (detail + weights.skin_bias) * imp;
            result.detail += detail * imp;
            result.saturation +=
                saturation as f64 / 255.0 * (detail + weights.saturation_bias) * imp;
            result.boost += boost as f64 / 255.0 * imp;
        }
    }

    result.total = (result.detail * weights.detail
        + result.skin * weights.skin
        + result.saturation * weights.saturation
        + result.boost * weights.boost)
        / (crop.width * crop.height);
    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn params(rule_of_thirds: bool) -> ImportanceParams {
        ImportanceParams {
            rule_of_thirds,
            ..ImportanceParams::default()
        }
    }

    #[test]
    fn test_outside_importance() {
        let crop = Candidate::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(importance(&params(true), &crop, 0.0, 0.0), -0.5);
        assert_eq!(importance(&params(true), &crop, 20.0, 15.0), -0.5);
    }

    #[test]
    fn test_center_importance_without_thirds() {
        let crop = Candidate::new(0.0, 0.0, 10.0, 10.0);
        assert_relative_eq!(importance(&params(false), &crop, 5.0, 5.0), 1.41);
    }

    #[test]
    fn test_corner_penalized() {
        let crop = Candidate::new(0.0, 0.0, 10.0, 10.0);
        let corner = importance(&params(false), &crop, 0.0, 0.0);
        // px = py = 1, dx = dy = 0.4 -> d = 0.32 * -20
        assert_relative_eq!(corner, 1.41 - 2f64.sqrt() - 6.4, epsilon = 1e-12);
    }

    #[test]
    fn test_thirds_peaks_at_one_third() {
        assert_relative_eq!(thirds(1.0 / 3.0), 1.0, epsilon = 1e-12);
        assert_eq!(thirds(0.0), 0.0);
        assert_eq!(thirds(1.0), 0.0);
    }

    #[test]
    fn test_empty_map_scores_zero() {
        let map = FeatureMap::zeros(4, 4);
        let s = score(&SearchOptions::default(), &map, &Candidate::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(s, Score::default());
    }

    #[test]
    fn test_single_white_pixel_matches_reference_values() {
        // A single sample with every channel at 255 inside a 1x1 crop at the
        // crop's top-left corner.
        let mut map = FeatureMap::zeros(1, 1);
        map.data.fill(255);
        let opts = SearchOptions {
            score_down_sample: 1,
            ..SearchOptions::default()
        };
        let crop = Candidate::new(0.0, 0.0, 1.0, 1.0);
        let imp = importance(&opts.importance, &crop, 0.0, 0.0);
        let s = score(&opts, &map, &crop);
        assert_relative_eq!(s.detail, imp, epsilon = 1e-12);
        assert_relative_eq!(s.skin, 1.01 * imp, epsilon = 1e-12);
        assert_relative_eq!(s.saturation, 1.2 * imp, epsilon = 1e-12);
        assert_relative_eq!(s.boost, imp, epsilon = 1e-12);
        let total = imp * (0.2 + 1.8 * 1.01 + 0.1 * 1.2 + 100.0);
        assert_relative_eq!(s.total, total, epsilon = 1e-9);
    }

    #[test]
    fn test_total_is_area_normalized() {
        let mut map = FeatureMap::zeros(2, 2);
        map.data.fill(128);
        let opts = SearchOptions {
            score_down_sample: 1,
            ..SearchOptions::default()
        };
        let crop = Candidate::new(0.0, 0.0, 2.0, 2.0);
        let s = score(&opts, &map, &crop);
        let unnormalized = s.detail * 0.2 + s.skin * 1.8 + s.saturation * 0.1 + s.boost * 100.0;
        assert_relative_eq!(s.total * 4.0, unnormalized, epsilon = 1e-9);
    }
}
