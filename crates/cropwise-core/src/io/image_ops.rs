use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::buffer::PixelBuffer;
use crate::error::{CropError, Result};

use super::image_io::load_image;

/// Image decoding and resampling backend used by the search.
///
/// The engine only needs these three operations, so any bitmap library can
/// stand in for the default [`ImageCrateOps`].
pub trait ImageOperations: Send + Sync {
    /// Decode the image at `source` into RGBA.
    fn open(&self, source: &Path) -> Result<PixelBuffer>;

    /// Resample `image` to exactly `width x height`.
    fn resample(&self, image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer>;

    /// Raw RGBA bytes of `image`.
    fn get_data<'a>(&self, image: &'a PixelBuffer) -> &'a [u8] {
        image.data()
    }
}

/// [`ImageOperations`] backed by the `image` crate.
#[derive(Clone, Copy, Debug)]
pub struct ImageCrateOps {
    pub filter: FilterType,
}

impl Default for ImageCrateOps {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl ImageOperations for ImageCrateOps {
    fn open(&self, source: &Path) -> Result<PixelBuffer> {
        load_image(source)
    }

    fn resample(&self, image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer> {
        if width == 0 || height == 0 {
            return Err(CropError::InvalidDimensions { width, height });
        }
        let src: RgbaImage = image.clone().try_into()?;
        let resized = imageops::resize(&src, width, height, self.filter);
        PixelBuffer::from_raw(width, height, resized.into_raw())
    }
}
