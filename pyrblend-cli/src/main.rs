use clap::Parser;
use pyrblend::io::{load_rgb_image, save_rgb_image};
use pyrblend::{Mask, Pyramid};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Blend two images with Laplacian pyramids")]
struct Cli {
    /// Image filling the left side of the composite.
    #[arg(long, value_name = "FILE")]
    left: PathBuf,
    /// Image filling the right side of the composite.
    #[arg(long, value_name = "FILE")]
    right: PathBuf,
    /// Output path; format follows the extension.
    #[arg(short, long, value_name = "FILE", default_value = "composite.png")]
    output: PathBuf,
    /// Working width; defaults to the left image's width.
    #[arg(long)]
    width: Option<usize>,
    /// Working height; defaults to the left image's height.
    #[arg(long)]
    height: Option<usize>,
    /// Pyramid depth; defaults to the deepest the working size allows, capped at 4.
    #[arg(long)]
    depth: Option<usize>,
    /// Column fraction where the blend band starts (full left image before it).
    #[arg(long, default_value_t = 0.4)]
    start: f32,
    /// Column fraction where the blend band ends (full right image after it).
    #[arg(long, default_value_t = 0.6)]
    end: f32,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("pyrblend=info".parse()?))
            .with_target(false)
            .init();
    }

    let left_image = load_rgb_image(&cli.left)?;
    let right_image = load_rgb_image(&cli.right)?;

    let width = cli.width.unwrap_or_else(|| left_image.width());
    let height = cli.height.unwrap_or_else(|| left_image.height());

    let mut left = Pyramid::with_size(left_image, width, height)?;
    let mut right = Pyramid::with_size(right_image, width, height)?;

    let depth = cli.depth.unwrap_or_else(|| left.max_depth().min(4));
    left.set_depth(depth)?;
    right.set_depth(depth)?;

    let mask = Mask::horizontal_ramp(width, height, cli.start, cli.end)?;
    let combined = Pyramid::combine(&left, &right, &mask)?;

    save_rgb_image(&combined.resized_image(), &cli.output)?;
    println!(
        "wrote {} ({}x{}, depth {})",
        cli.output.display(),
        width,
        height,
        depth
    );

    Ok(())
}
