pub mod crop;
pub mod image_io;
pub mod image_ops;

pub use crop::{crop_buffer, crop_image, CropRect};
pub use image_io::{load_image, save_feature_map, save_image, save_png};
pub use image_ops::{ImageCrateOps, ImageOperations};
