//! Turning aspect-ratio and size constraints into a crop.
//!
//! [`compute_target`] decides how large the crop must be and whether a search
//! is needed at all; [`SmartCropper`] runs the search when it is and reports
//! the result to a [`CropSink`].

pub mod constraints;
pub mod smart;
pub mod target;

pub use constraints::{CallerOptions, RatioConstraints};
pub use smart::{CropCallback, CropSink, SmartCropper, ValueMode};
pub use target::{compute_target, CropTarget};
