use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// ITU-R BT.601 luma of an 8-bit RGB triple, in [0, 255].
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64
}

/// HSL saturation of an 8-bit RGB triple, in [0, 1].
pub fn hsl_saturation(r: u8, g: u8, b: u8) -> f64 {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }
    let l = (max + min) / 2.0;
    let d = max - min;
    if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    }
}

/// Similarity of a pixel's color direction to `reference`:
/// `1 - |normalize(rgb) - reference|`.
///
/// Black has no direction and scores 0.
pub fn skin_likeness(r: u8, g: u8, b: u8, reference: &[f64; 3]) -> f64 {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let mag = (r * r + g * g + b * b).sqrt();
    if mag == 0.0 {
        return 0.0;
    }
    let rd = r / mag - reference[0];
    let gd = g / mag - reference[1];
    let bd = b / mag - reference[2];
    1.0 - (rd * rd + gd * gd + bd * bd).sqrt()
}
