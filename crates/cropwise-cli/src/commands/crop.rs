use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use cropwise_core::config::CropConfig;
use cropwise_core::features::{BoostRegion, StaticBoosts};
use cropwise_core::io::{crop_buffer, save_image, CropRect, ImageCrateOps, ImageOperations};
use cropwise_core::ratio::{RatioConstraints, ValueMode};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::debug;

use crate::summary::{print_crop_results, print_crop_summary, CropOutcome};

/// Ratio and minimum-size flags shared by `crop` and `info`.
#[derive(Args, Clone, Debug, Default)]
pub struct RatioArgs {
    /// Aspect ratio (width / height); the lower bound when --max-aspect is set
    #[arg(long)]
    pub aspect: Option<f64>,

    /// Upper bound of the allowed aspect ratio
    #[arg(long)]
    pub max_aspect: Option<f64>,

    /// Minimum crop width in pixels
    #[arg(long)]
    pub min_width: Option<f64>,

    /// Minimum crop height in pixels
    #[arg(long)]
    pub min_height: Option<f64>,

    /// Smallest crop as a fraction of the largest fitting rectangle
    #[arg(long)]
    pub min_scale: Option<f64>,

    /// Floor applied to the minimum scale
    #[arg(long)]
    pub min_scale_threshold: Option<f64>,
}

impl RatioArgs {
    /// Override the fields of `constraints` that were given on the command line.
    pub fn apply_to(&self, constraints: &mut RatioConstraints) {
        if self.aspect.is_some() {
            constraints.min_ratio = self.aspect;
        }
        if self.max_aspect.is_some() {
            constraints.max_ratio = self.max_aspect;
        }
        if self.min_width.is_some() {
            constraints.min_width = self.min_width;
        }
        if self.min_height.is_some() {
            constraints.min_height = self.min_height;
        }
        if self.min_scale.is_some() {
            constraints.min_scale = self.min_scale;
        }
        if let Some(threshold) = self.min_scale_threshold {
            constraints.min_scale_threshold = threshold;
        }
    }
}

#[derive(Args)]
pub struct CropArgs {
    /// Input images
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub ratio: RatioArgs,

    /// Region to favour, as x,y,width,height,weight (repeatable)
    #[arg(long = "boost")]
    pub boosts: Vec<String>,

    /// Crop config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search the full-resolution image instead of a 256 px proxy
    #[arg(long)]
    pub no_prescale: bool,

    /// Write cropped images into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Resize written crops to WIDTHxHEIGHT
    #[arg(long)]
    pub resize: Option<String>,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => CropConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CropConfig::default(),
    };
    args.ratio.apply_to(&mut config.ratio);
    if args.no_prescale {
        config.search.prescale = false;
    }

    let boosts = args
        .boosts
        .iter()
        .map(|b| parse_boost(b))
        .collect::<Result<Vec<_>>>()?;
    let resize = args.resize.as_deref().map(parse_size).transpose()?;

    if let Some(ref dir) = args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    print_crop_summary(&config, args.files.len(), boosts.len());

    let pb = if args.files.len() > 1 {
        ProgressBar::new(args.files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Cropping [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let outcomes: Vec<CropOutcome> = args
        .files
        .par_iter()
        .map(|file| {
            let outcome = crop_file(file, &config, &boosts, args.output_dir.as_deref(), resize);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    print_crop_results(&outcomes);

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    if failed > 0 {
        bail!("{failed} of {} file(s) failed", outcomes.len());
    }
    Ok(())
}

fn crop_file(
    file: &Path,
    config: &CropConfig,
    boosts: &[BoostRegion],
    output_dir: Option<&Path>,
    resize: Option<(u32, u32)>,
) -> CropOutcome {
    let mut outcome = CropOutcome {
        file: file.to_path_buf(),
        rect: None,
        output: None,
        error: None,
    };

    let mut cropper = config.smart_cropper();
    if !boosts.is_empty() {
        cropper = cropper.with_boost_source(Box::new(StaticBoosts(boosts.to_vec())));
    }

    let ops = ImageCrateOps::default();
    let image = match ops.open(file) {
        Ok(image) => image,
        Err(e) => {
            outcome.error = Some(e.to_string());
            return outcome;
        }
    };

    let mut sink = |rect: CropRect, _constrain: bool, mode: ValueMode| {
        debug!(file = %file.display(), ?rect, ?mode, "Crop suggested");
    };
    match cropper.apply(&image, &mut sink) {
        Ok(rect) => outcome.rect = rect,
        Err(e) => {
            outcome.error = Some(e.to_string());
            return outcome;
        }
    }

    if let (Some(dir), Some(rect)) = (output_dir, outcome.rect) {
        let (w, h) = resize.unwrap_or((rect.width, rect.height));
        let output = crop_output_path(dir, file, w, h);
        let written = crop_buffer(&image, &rect)
            .and_then(|cropped| match resize {
                Some((w, h)) => ops.resample(&cropped, w, h),
                None => Ok(cropped),
            })
            .and_then(|cropped| save_image(&cropped, &output));
        match written {
            Ok(()) => outcome.output = Some(output),
            Err(e) => outcome.error = Some(e.to_string()),
        }
    }
    outcome
}

fn crop_output_path(dir: &Path, source: &Path, w: u32, h: u32) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    dir.join(format!("{stem}_crop{w}x{h}.{ext}"))
}

fn parse_boost(s: &str) -> Result<BoostRegion> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid boost format: {s}"))?;
    let &[x, y, width, height, weight] = values.as_slice() else {
        bail!("Boost needs 5 values (x,y,width,height,weight), got {}", values.len());
    };
    Ok(BoostRegion::new(x, y, width, height, weight).validated()?)
}

fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("Invalid size {s}, expected WIDTHxHEIGHT"))?;
    let w = w.trim().parse().with_context(|| format!("Invalid width in {s}"))?;
    let h = h.trim().parse().with_context(|| format!("Invalid height in {s}"))?;
    Ok((w, h))
}
