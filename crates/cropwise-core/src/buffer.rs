use image::RgbaImage;

use crate::consts::CHANNEL_COUNT;
use crate::error::{CropError, Result};

/// An RGBA8 raster, row-major, 4 bytes per pixel.
///
/// Produced by an [`ImageOperations`](crate::io::image_ops::ImageOperations)
/// backend and never mutated by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking `data.len() == width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CropError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * CHANNEL_COUNT;
        if data.len() != expected {
            return Err(CropError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Result<Self> {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNEL_COUNT);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::from_raw(width, height, data)
    }

    /// A buffer filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        Self::from_fn(width, height, |_, _| rgba)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNEL_COUNT;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

impl TryFrom<PixelBuffer> for RgbaImage {
    type Error = CropError;

    fn try_from(buf: PixelBuffer) -> Result<Self> {
        let (width, height) = (buf.width, buf.height);
        RgbaImage::from_raw(width, height, buf.data)
            .ok_or(CropError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            CropError::InvalidBuffer {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_from_raw_rejects_zero_dimension() {
        let err = PixelBuffer::from_raw(0, 4, vec![]).unwrap_err();
        assert!(matches!(err, CropError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_pixel_indexing_is_row_major() {
        let buf = PixelBuffer::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, 255]).unwrap();
        assert_eq!(buf.pixel(2, 1), [2, 1, 0, 255]);
        assert_eq!(buf.pixel(0, 1), [0, 1, 0, 255]);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let buf = PixelBuffer::filled(4, 3, [10, 20, 30, 255]).unwrap();
        let img: RgbaImage = buf.clone().try_into().unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(PixelBuffer::from(img), buf);
    }
}
