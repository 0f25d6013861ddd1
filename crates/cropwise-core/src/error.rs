use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("Invalid search options: {0}")]
    InvalidOptions(String),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Invalid boost region: {0}")]
    InvalidBoost(String),

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CropError>;
