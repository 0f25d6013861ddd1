use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cropwise_core::color::{average_color, ColorAlgorithm};
use cropwise_core::io::image_io::load_image;

#[derive(Args)]
pub struct ColorArgs {
    /// Input image
    pub file: PathBuf,

    /// Averaging algorithm: simple, sqrt or dominant
    #[arg(long, default_value = "sqrt")]
    pub algorithm: String,
}

pub fn run(args: &ColorArgs) -> Result<()> {
    let algorithm: ColorAlgorithm = args.algorithm.parse()?;
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let [r, g, b, a] = average_color(&image, algorithm);
    println!("#{r:02x}{g:02x}{b:02x}{a:02x}  rgba({r}, {g}, {b}, {a})  [{algorithm}]");
    Ok(())
}
