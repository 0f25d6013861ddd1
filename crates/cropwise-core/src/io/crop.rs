use std::path::Path;

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::consts::CHANNEL_COUNT;
use crate::error::{CropError, Result};
use crate::search::Candidate;

use super::image_io::{load_image, save_image};

/// A rectangle in original image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that the rect is non-empty and fits within `src_w x src_h`.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<CropRect> {
        if self.width == 0 || self.height == 0 {
            return Err(CropError::InvalidCrop(
                "Crop width and height must be > 0".into(),
            ));
        }

        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        if right > src_w as u64 || bottom > src_h as u64 {
            return Err(CropError::InvalidCrop(format!(
                "Crop region ({},{} {}x{}) exceeds source dimensions ({src_w}x{src_h})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }

    /// Shrink the rect so it lies within `src_w x src_h`.
    pub fn clamped(&self, src_w: u32, src_h: u32) -> CropRect {
        let x = self.x.min(src_w);
        let y = self.y.min(src_h);
        CropRect {
            x,
            y,
            width: self.width.min(src_w - x),
            height: self.height.min(src_h - y),
        }
    }
}

impl From<&Candidate> for CropRect {
    fn from(c: &Candidate) -> Self {
        // Candidates are non-negative; the cast truncates like the rescale step.
        CropRect {
            x: c.x.max(0.0) as u32,
            y: c.y.max(0.0) as u32,
            width: c.width.max(0.0) as u32,
            height: c.height.max(0.0) as u32,
        }
    }
}

/// Copy the region `crop` out of `buf`.
pub fn crop_buffer(buf: &PixelBuffer, crop: &CropRect) -> Result<PixelBuffer> {
    let validated = crop.validated(buf.width(), buf.height())?;
    let row_bytes = validated.width as usize * CHANNEL_COUNT;
    let src_stride = buf.width() as usize * CHANNEL_COUNT;
    let mut out = Vec::with_capacity(row_bytes * validated.height as usize);

    for row in 0..validated.height as usize {
        let start =
            (validated.y as usize + row) * src_stride + validated.x as usize * CHANNEL_COUNT;
        out.extend_from_slice(&buf.data()[start..start + row_bytes]);
    }

    PixelBuffer::from_raw(validated.width, validated.height, out)
}

/// Crop an image file to a new file, optionally resizing to `resize_to`.
pub fn crop_image(
    input: &Path,
    output: &Path,
    crop: &CropRect,
    resize_to: Option<(u32, u32)>,
) -> Result<CropRect> {
    let source = load_image(input)?;
    let mut cropped = crop_buffer(&source, crop)?;

    if let Some((w, h)) = resize_to {
        let img: image::RgbaImage = cropped.try_into()?;
        let resized = imageops::resize(&img, w, h, imageops::FilterType::Lanczos3);
        cropped = PixelBuffer::from_raw(w, h, resized.into_raw())?;
    }

    save_image(&cropped, output)?;
    Ok(*crop)
}
