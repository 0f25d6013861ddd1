use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::ColorAlgorithm;
use crate::error::Result;
use crate::ratio::{RatioConstraints, SmartCropper};
use crate::search::SearchOptions;

/// Everything needed to crop an image, as stored in a TOML file.
///
/// Every section is optional; missing fields take their documented defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub color: ColorAlgorithm,
    pub ratio: RatioConstraints,
    pub search: SearchOptions,
}

impl CropConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: CropConfig = toml::from_str(s)?;
        config.ratio.validate()?;
        config.search.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "Loaded crop config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A [`SmartCropper`] using the default image backend.
    pub fn smart_cropper(&self) -> SmartCropper {
        SmartCropper::new(self.ratio.clone())
            .with_search_options(self.search.clone())
            .with_color_algorithm(self.color)
    }
}
