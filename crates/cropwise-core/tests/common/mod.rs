#![allow(dead_code)]

use cropwise_core::buffer::PixelBuffer;

pub const GRAY: [u8; 4] = [100, 100, 100, 255];

/// A skin-toned color that passes the default skin thresholds.
pub const SKIN: [u8; 4] = [199, 145, 112, 255];

/// Uniform opaque image.
pub fn flat(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(width, height, rgba).expect("non-empty test image")
}

/// `background` with the rectangle `(x, y, w, h)` painted in `fill`.
pub fn with_patch(
    width: u32,
    height: u32,
    background: [u8; 4],
    patch: (u32, u32, u32, u32),
    fill: [u8; 4],
) -> PixelBuffer {
    let (px, py, pw, ph) = patch;
    PixelBuffer::from_fn(width, height, |x, y| {
        if x >= px && x < px + pw && y >= py && y < py + ph {
            fill
        } else {
            background
        }
    })
    .expect("non-empty test image")
}

/// Black and white squares of `cell` pixels, starting white at the origin.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
    .expect("non-empty test image")
}

/// Write `buf` as PNG into `dir` and return its path.
pub fn write_png(dir: &tempfile::TempDir, name: &str, buf: &PixelBuffer) -> std::path::PathBuf {
    let path = dir.path().join(name);
    cropwise_core::io::save_png(buf, &path).expect("write test png");
    path
}
