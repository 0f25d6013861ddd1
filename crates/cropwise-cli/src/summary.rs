use std::path::PathBuf;

use console::Style;
use cropwise_core::config::CropConfig;
use cropwise_core::io::crop::CropRect;

/// Result of cropping one file.
pub struct CropOutcome {
    pub file: PathBuf,
    pub rect: Option<CropRect>,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

struct Styles {
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

fn optional(s: &Styles, value: Option<f64>) -> String {
    match value {
        Some(v) => s.value.apply_to(format!("{v}")).to_string(),
        None => s.disabled.apply_to("unset").to_string(),
    }
}

pub fn print_crop_summary(config: &CropConfig, files: usize, boosts: usize) {
    let s = Styles::new();
    let ratio = &config.ratio;
    let search = &config.search;

    println!();
    println!("  {}", s.header.apply_to("Cropwise"));
    println!("  {}", s.header.apply_to("\u{2550}".repeat(8)));
    println!();
    println!("  {:<14}{}", s.label.apply_to("Files"), s.value.apply_to(files));
    println!();

    println!("  {}", s.header.apply_to("Constraints"));
    println!("    {:<12}{}", s.label.apply_to("Aspect"), optional(&s, ratio.min_ratio));
    println!("    {:<12}{}", s.label.apply_to("Max aspect"), optional(&s, ratio.max_ratio));
    println!("    {:<12}{}", s.label.apply_to("Min width"), optional(&s, ratio.min_width));
    println!("    {:<12}{}", s.label.apply_to("Min height"), optional(&s, ratio.min_height));
    println!("    {:<12}{}", s.label.apply_to("Min scale"), optional(&s, ratio.min_scale));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Threshold"),
        s.value.apply_to(ratio.min_scale_threshold)
    );
    println!();

    println!("  {}", s.header.apply_to("Search"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Step"),
        s.value.apply_to(format!("{} px", search.step))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Down-sample"),
        s.value.apply_to(format!("{}x", search.score_down_sample))
    );
    if search.prescale {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Prescale"),
            s.value.apply_to(format!("{} px", search.prescale_target))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Prescale"),
            s.disabled.apply_to("disabled")
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Boosts"),
        s.value.apply_to(boosts + search.boost.len())
    );
    println!();
}

pub fn print_crop_results(outcomes: &[CropOutcome]) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Results"));
    for outcome in outcomes {
        let name = outcome
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.file.display().to_string());

        if let Some(ref err) = outcome.error {
            println!("    {:<24}{}", s.label.apply_to(name), s.error.apply_to(err));
            continue;
        }
        match outcome.rect {
            Some(r) => {
                let rect = format!("{}x{} at ({}, {})", r.width, r.height, r.x, r.y);
                match outcome.output {
                    Some(ref out) => println!(
                        "    {:<24}{}  {}",
                        s.label.apply_to(name),
                        s.value.apply_to(rect),
                        s.path.apply_to(out.display())
                    ),
                    None => println!("    {:<24}{}", s.label.apply_to(name), s.value.apply_to(rect)),
                }
            }
            None => println!(
                "    {:<24}{}",
                s.label.apply_to(name),
                s.disabled.apply_to("no crop suggested")
            ),
        }
    }
    println!();
}
