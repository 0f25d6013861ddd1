use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::consts::{CHANNEL_COUNT, DEFAULT_NEUTRAL_COLOR, DOMINANT_COLOR_BUCKET};
use crate::error::CropError;

/// Strategy used to reduce an image to a single representative color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorAlgorithm {
    /// Arithmetic mean of each channel.
    Simple,
    /// Root mean square of each color channel; closer to perceived brightness.
    #[default]
    Sqrt,
    /// Mean of the most populated quantized color bucket.
    Dominant,
}

impl std::fmt::Display for ColorAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Sqrt => write!(f, "sqrt"),
            Self::Dominant => write!(f, "dominant"),
        }
    }
}

impl FromStr for ColorAlgorithm {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "sqrt" => Ok(Self::Sqrt),
            "dominant" => Ok(Self::Dominant),
            other => Err(CropError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Average color of `buf` as RGBA.
///
/// Fully transparent pixels are ignored; if nothing remains the neutral
/// default color is returned.
pub fn average_color(buf: &PixelBuffer, algorithm: ColorAlgorithm) -> [u8; 4] {
    let visible = buf
        .data()
        .chunks_exact(CHANNEL_COUNT)
        .filter(|px| px[3] > 0);

    match algorithm {
        ColorAlgorithm::Simple => mean_of(visible, |v| v, |v| v),
        ColorAlgorithm::Sqrt => mean_of(visible, |v| v * v, f64::sqrt),
        ColorAlgorithm::Dominant => dominant(visible),
    }
}

fn mean_of<'a>(
    pixels: impl Iterator<Item = &'a [u8]>,
    map: impl Fn(f64) -> f64,
    unmap: impl Fn(f64) -> f64,
) -> [u8; 4] {
    let mut acc = [0.0f64; 4];
    let mut count = 0usize;
    for px in pixels {
        for c in 0..3 {
            acc[c] += map(px[c] as f64);
        }
        acc[3] += px[3] as f64;
        count += 1;
    }
    if count == 0 {
        return DEFAULT_NEUTRAL_COLOR;
    }
    let n = count as f64;
    [
        unmap(acc[0] / n).round() as u8,
        unmap(acc[1] / n).round() as u8,
        unmap(acc[2] / n).round() as u8,
        (acc[3] / n).round() as u8,
    ]
}

fn dominant<'a>(pixels: impl Iterator<Item = &'a [u8]>) -> [u8; 4] {
    let mut buckets: HashMap<[u8; 3], ([u64; 4], u64)> = HashMap::new();
    for px in pixels {
        let key = [
            px[0] / DOMINANT_COLOR_BUCKET,
            px[1] / DOMINANT_COLOR_BUCKET,
            px[2] / DOMINANT_COLOR_BUCKET,
        ];
        let entry = buckets.entry(key).or_insert(([0; 4], 0));
        for c in 0..4 {
            entry.0[c] += px[c] as u64;
        }
        entry.1 += 1;
    }

    // Largest bucket; ties resolve to the lowest key so the result is stable.
    let best = buckets
        .iter()
        .max_by(|a, b| a.1 .1.cmp(&b.1 .1).then_with(|| b.0.cmp(a.0)));

    match best {
        Some((_, (sum, n))) => [
            (sum[0] / n) as u8,
            (sum[1] / n) as u8,
            (sum[2] / n) as u8,
            (sum[3] / n) as u8,
        ],
        None => DEFAULT_NEUTRAL_COLOR,
    }
}
