use ndarray::{s, Array3, Axis};

use crate::consts::{
    BOOST_CHANNEL, CHANNEL_COUNT, DETAIL_CHANNEL, DOWNSAMPLE_DETAIL_MIX, DOWNSAMPLE_SKIN_MIX,
    SATURATION_CHANNEL, SKIN_CHANNEL,
};

use super::clamp_u8;
use super::map::FeatureMap;

/// Reduce `map` by `factor` in each dimension using `factor x factor` blocks.
///
/// Output is `floor(w / factor) x floor(h / factor)`; trailing partial blocks
/// are dropped. Skin and detail blend the block average with the block
/// maximum so small, sharp features keep their influence; saturation and
/// boost are plain averages. A factor of 0 is treated as 1.
pub fn down_sample(map: &FeatureMap, factor: usize) -> FeatureMap {
    let factor = factor.max(1);
    let out_w = map.width() / factor;
    let out_h = map.height() / factor;
    let inv_area = 1.0 / (factor * factor) as f64;

    let mut data = Array3::<u8>::zeros((out_h, out_w, CHANNEL_COUNT));
    for y in 0..out_h {
        for x in 0..out_w {
            let block = map.data.slice(s![
                y * factor..(y + 1) * factor,
                x * factor..(x + 1) * factor,
                ..
            ]);

            let mut sum = [0.0f64; CHANNEL_COUNT];
            let mut peak = [0u8; CHANNEL_COUNT];
            for px in block.lanes(Axis(2)) {
                for c in 0..CHANNEL_COUNT {
                    sum[c] += px[c] as f64;
                    peak[c] = peak[c].max(px[c]);
                }
            }

            let avg = |c: usize| sum[c] * inv_area;
            let mix = |c: usize, (a, m): (f64, f64)| avg(c) * a + peak[c] as f64 * m;

            data[[y, x, SKIN_CHANNEL]] = clamp_u8(mix(SKIN_CHANNEL, DOWNSAMPLE_SKIN_MIX));
            data[[y, x, DETAIL_CHANNEL]] = clamp_u8(mix(DETAIL_CHANNEL, DOWNSAMPLE_DETAIL_MIX));
            data[[y, x, SATURATION_CHANNEL]] = clamp_u8(avg(SATURATION_CHANNEL));
            data[[y, x, BOOST_CHANNEL]] = clamp_u8(avg(BOOST_CHANNEL));
        }
    }

    FeatureMap { data }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dimensions_floor() {
        let map = FeatureMap::zeros(17, 9);
        let out = down_sample(&map, 4);
        assert_eq!((out.width(), out.height()), (4, 2));
    }

    #[test]
    fn test_factor_one_is_identity() {
        let mut map = FeatureMap::zeros(3, 2);
        map.data[[1, 2, DETAIL_CHANNEL]] = 77;
        map.data[[0, 1, BOOST_CHANNEL]] = 12;
        assert_eq!(down_sample(&map, 1), map);
    }

    #[test]
    fn test_single_hot_pixel_blend() {
        let mut map = FeatureMap::zeros(2, 2);
        for c in 0..CHANNEL_COUNT {
            map.data[[0, 0, c]] = 200;
        }
        let out = down_sample(&map, 2);
        // avg = 50, max = 200
        assert_eq!(out.get(0, 0), [125, 95, 50, 50]);
    }
}
