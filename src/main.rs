use clap::{Parser, Subcommand};
use genprep::config::{self, Config};
use genprep::imaging::{self, PixelBuffer, ResizeMode, ResizeRequest};
use genprep::output::{self, ResizeReport};
use genprep::{naming, prompts, scan};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "genprep")]
#[command(about = "Image preprocessing helpers for generative-image pipelines")]
#[command(long_about = "\
Image preprocessing helpers for generative-image pipelines

Resize images to an exact canvas, keep them under a pixel budget, list input
folders, and build date-partitioned output names.

Resize modes:
  stretch      scale to the exact size, ignoring aspect ratio
  crop-fill    cover the canvas, center-crop the overflow
  fit-extend   fit inside the canvas, extend edge pixels into the margins

Outputs without --output go to <output.dir>/YYYY-MM-DD/ as configured in
genprep.toml. Run 'genprep gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Directory containing genprep.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize an image to an exact width and height
    Resize {
        input: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Defaults to resize.mode from the config
        #[arg(long, value_enum)]
        mode: Option<ResizeMode>,
        /// Defaults to a generated name under output.dir
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Downscale an image whose pixel count exceeds a budget
    Cap {
        input: PathBuf,
        /// Defaults to resize.max_pixels from the config
        #[arg(long)]
        max_pixels: Option<u64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List files in a folder, recursively
    List {
        folder: PathBuf,
        /// Dot-prefixed extension to keep (repeatable); defaults to listing.extensions
        #[arg(long = "ext")]
        extensions: Vec<String>,
        /// Keep every file regardless of extension
        #[arg(long, conflicts_with = "extensions")]
        all: bool,
        /// Substring the file name (without extension) must contain
        #[arg(long)]
        filter: Option<String>,
        /// Print a JSON array instead of the indexed listing
        #[arg(long)]
        json: bool,
    },
    /// Print a fresh date-partitioned output path
    TempName {
        /// Defaults to output.extension from the config
        #[arg(long = "ext")]
        extension: Option<String>,
    },
    /// Join prompt fragments with ", ", skipping empty ones
    Join {
        prompts: Vec<String>,
        /// Printed when every fragment is empty
        #[arg(long)]
        default: Option<String>,
    },
    /// Print a stock genprep.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    run(cli).inspect_err(|e| error!("{e}"))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("genprep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("genprep=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // gen-config must keep working when the existing config file is broken
    let config = match cli.command {
        Command::GenConfig => Config::default(),
        _ => config::load_config(&cli.config_dir)?,
    };
    debug!(config_dir = %cli.config_dir.display(), ?config, "loaded config");

    match cli.command {
        Command::Resize {
            input,
            width,
            height,
            mode,
            output: explicit_output,
        } => {
            let image = load_rgb(&input)?;
            let request = ResizeRequest::new(width, height, mode.unwrap_or(config.resize.mode));
            let source = dims(&image)?;
            let resized = imaging::resize_to(&image, &request)?;

            let saved_to = output_path(explicit_output, &config)?;
            imaging::save_image(&resized, &saved_to)?;
            output::print_resize_report(&ResizeReport {
                label: &request.mode.to_string(),
                source,
                result: dims(&resized)?,
                covered: imaging::covers_canvas(source, request.dimensions()),
                saved_to: &saved_to,
            });
        }
        Command::Cap {
            input,
            max_pixels,
            output: explicit_output,
        } => {
            let image = load_rgb(&input)?;
            let capped = imaging::cap_area(&image, max_pixels.unwrap_or(config.resize.max_pixels))?;

            let saved_to = output_path(explicit_output, &config)?;
            imaging::save_image(&capped, &saved_to)?;
            output::print_resize_report(&ResizeReport {
                label: "cap",
                source: dims(&image)?,
                result: dims(&capped)?,
                covered: true,
                saved_to: &saved_to,
            });
        }
        Command::List {
            folder,
            extensions,
            all,
            filter,
            json,
        } => {
            let extensions = match (all, extensions.is_empty()) {
                (true, _) => None,
                (false, true) => Some(config.listing.extensions.clone()),
                (false, false) => Some(extensions),
            };
            let files = scan::list_files(&folder, extensions.as_deref(), filter.as_deref())?;
            if json {
                println!("{}", output::format_listing_json(&files)?);
            } else {
                output::print_listing(&folder, &files);
            }
        }
        Command::TempName { extension } => {
            let extension = extension.unwrap_or_else(|| config.output.extension.clone());
            let name = naming::generate_temp_filename(
                &config.output.dir,
                extension.trim_start_matches('.'),
            )?;
            output::print_temp_name(&name);
        }
        Command::Join {
            prompts: fragments,
            default,
        } => {
            let kept = prompts::remove_empty_str(&fragments, default.as_deref());
            println!("{}", prompts::join_prompts(&kept));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Decode an image file and normalize it to 3-channel RGB.
fn load_rgb(path: &Path) -> Result<PixelBuffer, imaging::ImagingError> {
    let decoded = imaging::load_image(path)?;
    imaging::normalize_channels(decoded.view().into_dyn())
}

/// `(width, height)` of a buffer.
fn dims(image: &PixelBuffer) -> Result<(u32, u32), std::num::TryFromIntError> {
    let (height, width, _) = image.dim();
    Ok((u32::try_from(width)?, u32::try_from(height)?))
}

/// Use the explicit output path, or generate one under the configured output
/// folder and create its date directory.
fn output_path(explicit: Option<PathBuf>, config: &Config) -> std::io::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let name = naming::generate_temp_filename(&config.output.dir, &config.output.extension)?;
    if let Some(parent) = name.path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(name.path)
}
