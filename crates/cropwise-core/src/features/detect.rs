use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::color::conversion::{hsl_saturation, luma, skin_likeness};
use crate::consts::{
    DEFAULT_SATURATION_BRIGHTNESS_MAX, DEFAULT_SATURATION_BRIGHTNESS_MIN,
    DEFAULT_SATURATION_THRESHOLD, DEFAULT_SKIN_BRIGHTNESS_MAX, DEFAULT_SKIN_BRIGHTNESS_MIN,
    DEFAULT_SKIN_COLOR, DEFAULT_SKIN_THRESHOLD,
};

use super::clamp_u8;

/// Thresholds that decide which pixels count as skin or as saturated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    pub skin_color: [f64; 3],
    pub skin_threshold: f64,
    pub skin_brightness_min: f64,
    pub skin_brightness_max: f64,
    pub saturation_threshold: f64,
    pub saturation_brightness_min: f64,
    pub saturation_brightness_max: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            skin_color: DEFAULT_SKIN_COLOR,
            skin_threshold: DEFAULT_SKIN_THRESHOLD,
            skin_brightness_min: DEFAULT_SKIN_BRIGHTNESS_MIN,
            skin_brightness_max: DEFAULT_SKIN_BRIGHTNESS_MAX,
            saturation_threshold: DEFAULT_SATURATION_THRESHOLD,
            saturation_brightness_min: DEFAULT_SATURATION_BRIGHTNESS_MIN,
            saturation_brightness_max: DEFAULT_SATURATION_BRIGHTNESS_MAX,
        }
    }
}

/// Edge response at `(row, col)` of a luma plane.
///
/// Interior pixels use the 4-neighbour Laplacian `4p - up - left - right - down`;
/// pixels on the 1-pixel border keep their luma.
pub fn edge_response(lumas: &Array2<f64>, row: usize, col: usize) -> u8 {
    let (h, w) = lumas.dim();
    let p = lumas[[row, col]];
    let v = if row == 0 || col == 0 || row + 1 >= h || col + 1 >= w {
        p
    } else {
        4.0 * p
            - lumas[[row - 1, col]]
            - lumas[[row, col - 1]]
            - lumas[[row, col + 1]]
            - lumas[[row + 1, col]]
    };
    clamp_u8(v)
}

/// Skin channel value for one pixel.
pub fn skin_response(rgb: [u8; 3], thresholds: &DetectionThresholds) -> u8 {
    let [r, g, b] = rgb;
    let lightness = luma(r, g, b) / 255.0;
    let skin = skin_likeness(r, g, b, &thresholds.skin_color);
    let is_skin = skin > thresholds.skin_threshold;
    let is_bright = lightness >= thresholds.skin_brightness_min
        && lightness <= thresholds.skin_brightness_max;
    if is_skin && is_bright {
        scale_above(skin, thresholds.skin_threshold)
    } else {
        0
    }
}

/// Saturation channel value for one pixel.
pub fn saturation_response(rgb: [u8; 3], thresholds: &DetectionThresholds) -> u8 {
    let [r, g, b] = rgb;
    let lightness = luma(r, g, b) / 255.0;
    let sat = hsl_saturation(r, g, b);
    let is_saturated = sat > thresholds.saturation_threshold;
    let is_bright = lightness >= thresholds.saturation_brightness_min
        && lightness <= thresholds.saturation_brightness_max;
    if is_saturated && is_bright {
        scale_above(sat, thresholds.saturation_threshold)
    } else {
        0
    }
}

/// Map `value` in `(threshold, 1]` onto `(0, 255]`.
fn scale_above(value: f64, threshold: f64) -> u8 {
    clamp_u8((value - threshold) * (255.0 / (1.0 - threshold)))
}
