mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cropwise", about = "Content-aware image cropping")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and the crop target for given constraints
    Info(commands::info::InfoArgs),
    /// Suggest (and optionally write) crops for one or more images
    Crop(commands::crop::CropArgs),
    /// Dump the feature map of an image as a PNG
    Features(commands::features::FeaturesArgs),
    /// Print the average color of an image
    Color(commands::color::ColorArgs),
    /// Print or save the default crop config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Crop(args) => commands::crop::run(args),
        Commands::Features(args) => commands::features::run(args),
        Commands::Color(args) => commands::color::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
