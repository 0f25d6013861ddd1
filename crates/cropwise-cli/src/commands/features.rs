use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cropwise_core::features::{build_feature_map, down_sample};
use cropwise_core::io::image_io::{load_image, save_feature_map};
use cropwise_core::search::SearchOptions;

#[derive(Args)]
pub struct FeaturesArgs {
    /// Input image
    pub file: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "features.png")]
    pub output: PathBuf,

    /// Block size to downsample the map by before writing (1 = full size)
    #[arg(long, default_value = "1")]
    pub down_sample: usize,
}

/// Dump the skin/detail/saturation map of an image as a PNG.
pub fn run(args: &FeaturesArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let opts = SearchOptions::default();

    let mut map = build_feature_map(&image, &opts.detection, &opts.boost);
    if args.down_sample > 1 {
        map = down_sample(&map, args.down_sample);
    }

    println!("Feature map:  {}x{}", map.width(), map.height());
    println!("Peak skin:    {}", map.skin().iter().max().unwrap_or(&0));
    println!("Peak detail:  {}", map.detail().iter().max().unwrap_or(&0));
    println!("Peak sat.:    {}", map.saturation().iter().max().unwrap_or(&0));

    save_feature_map(&map, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());
    Ok(())
}
