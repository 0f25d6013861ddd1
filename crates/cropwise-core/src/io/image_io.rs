use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::features::FeatureMap;

/// Load any supported image file as RGBA.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)?.to_rgba8();
    let (w, h) = img.dimensions();
    PixelBuffer::from_raw(w, h, img.into_raw())
}

/// Save a buffer as 8-bit RGBA PNG.
pub fn save_png(buf: &PixelBuffer, path: &Path) -> Result<()> {
    let img: RgbaImage = buf.clone().try_into()?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a buffer, choosing format from file extension (PNG if unknown).
///
/// Formats without alpha get the RGB channels only.
pub fn save_image(buf: &PixelBuffer, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    let img: RgbaImage = buf.clone().try_into()?;
    match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => {
            image::DynamicImage::ImageRgba8(img)
                .to_rgb8()
                .save_with_format(path, format)?;
        }
        _ => img.save_with_format(path, format)?,
    }
    Ok(())
}

/// Write a feature map for inspection: skin in red, detail in green,
/// saturation in blue. Boosted pixels are brightened by their boost value.
pub fn save_feature_map(map: &FeatureMap, path: &Path) -> Result<()> {
    let (w, h) = (map.width() as u32, map.height() as u32);
    let img = RgbaImage::from_fn(w, h, |x, y| {
        let [skin, detail, saturation, boost] = map.get(x as usize, y as usize);
        let lift = boost / 2;
        image::Rgba([
            skin.saturating_add(lift),
            detail.saturating_add(lift),
            saturation.saturating_add(lift),
            255,
        ])
    });
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
