pub mod average;
pub mod conversion;

pub use average::{average_color, ColorAlgorithm};
pub use conversion::{hsl_saturation, luma, skin_likeness};
