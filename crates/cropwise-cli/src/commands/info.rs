use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cropwise_core::color::{average_color, ColorAlgorithm};
use cropwise_core::config::CropConfig;
use cropwise_core::io::image_io::load_image;
use cropwise_core::ratio::compute_target;

use super::crop::RatioArgs;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    #[command(flatten)]
    pub ratio: RatioArgs,

    /// Crop config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => CropConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CropConfig::default(),
    };
    args.ratio.apply_to(&mut config.ratio);

    let image = load_image(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let target = compute_target(image.width(), image.height(), &config.ratio)?;
    let [r, g, b, a] = average_color(&image, ColorAlgorithm::Sqrt);

    println!("File:          {}", args.file.display());
    println!("Dimensions:    {}x{}", image.width(), image.height());
    println!(
        "Image ratio:   {:.4}",
        image.width() as f64 / image.height() as f64
    );
    println!("Average color: #{r:02x}{g:02x}{b:02x}{a:02x}");
    println!();
    println!("Crop ratio:    {:.4}", target.crop_ratio);
    println!(
        "Fitted:        {:.0}x{:.0}",
        target.fitted_width, target.fitted_height
    );
    println!("Min scale:     {:.3}", target.min_scale);
    println!("Target:        {:.0}x{:.0}", target.width, target.height);
    println!("Perfect ratio: {}", target.perfect_ratio);

    let plan = if target.is_empty() {
        "none (target is empty)"
    } else if target.skips_search() {
        "skipped (only one valid crop)"
    } else {
        "content-aware"
    };
    println!("Search:        {plan}");

    Ok(())
}
