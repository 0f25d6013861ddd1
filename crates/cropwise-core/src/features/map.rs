use ndarray::{Array2, Array3, ArrayView2, Axis};
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::color::conversion::luma;
use crate::consts::{
    BOOST_CHANNEL, CHANNEL_COUNT, DETAIL_CHANNEL, PARALLEL_PIXEL_THRESHOLD, SATURATION_CHANNEL,
    SKIN_CHANNEL,
};

use super::boost::{apply_boosts, BoostRegion};
use super::detect::{edge_response, saturation_response, skin_response, DetectionThresholds};

/// Four-channel feature raster, shape `(height, width, 4)`.
///
/// Channel order: skin, detail, saturation, boost.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMap {
    pub data: Array3<u8>,
}

impl FeatureMap {
    /// An all-zero map.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: Array3::zeros((height, width, CHANNEL_COUNT)),
        }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// `[skin, detail, saturation, boost]` at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        [
            self.data[[y, x, SKIN_CHANNEL]],
            self.data[[y, x, DETAIL_CHANNEL]],
            self.data[[y, x, SATURATION_CHANNEL]],
            self.data[[y, x, BOOST_CHANNEL]],
        ]
    }

    pub fn channel(&self, channel: usize) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(2), channel)
    }

    pub fn skin(&self) -> ArrayView2<'_, u8> {
        self.channel(SKIN_CHANNEL)
    }

    pub fn detail(&self) -> ArrayView2<'_, u8> {
        self.channel(DETAIL_CHANNEL)
    }

    pub fn saturation(&self) -> ArrayView2<'_, u8> {
        self.channel(SATURATION_CHANNEL)
    }

    pub fn boost(&self) -> ArrayView2<'_, u8> {
        self.channel(BOOST_CHANNEL)
    }
}

/// Derive the skin, detail, saturation and boost channels from `buf`.
///
/// The input is not modified. Large images are processed row-parallel.
pub fn build_feature_map(
    buf: &PixelBuffer,
    thresholds: &DetectionThresholds,
    boosts: &[BoostRegion],
) -> FeatureMap {
    let (w, h) = (buf.width() as usize, buf.height() as usize);
    let lumas = luma_plane(buf);

    let detect_row = |row: usize| -> Vec<[u8; 4]> {
        (0..w)
            .map(|col| {
                let [r, g, b, _] = buf.pixel(col as u32, row as u32);
                [
                    skin_response([r, g, b], thresholds),
                    edge_response(&lumas, row, col),
                    saturation_response([r, g, b], thresholds),
                    0,
                ]
            })
            .collect()
    };

    let rows: Vec<Vec<[u8; 4]>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(detect_row).collect()
    } else {
        (0..h).map(detect_row).collect()
    };

    let mut data = Array3::<u8>::zeros((h, w, CHANNEL_COUNT));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, px) in row_data.into_iter().enumerate() {
            for (c, v) in px.into_iter().enumerate() {
                data[[row, col, c]] = v;
            }
        }
    }

    apply_boosts(&mut data, boosts);
    FeatureMap { data }
}

fn luma_plane(buf: &PixelBuffer) -> Array2<f64> {
    let (w, h) = (buf.width() as usize, buf.height() as usize);
    Array2::from_shape_fn((h, w), |(row, col)| {
        let [r, g, b, _] = buf.pixel(col as u32, row as u32);
        luma(r, g, b)
    })
}
