use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use whiteout::cli::{CliArgs, Command, CompressionLevel, RemoveArgs, SplitArgs};
use whiteout::config::{CompressConfig, LoadedConfig, Thresholds};
use whiteout::error::WhiteoutError;
use whiteout::input::collect_image_paths;
use whiteout::remover::{RemoveOptions, remove_backgrounds};
use whiteout::sprite::convert_sheet;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match cli.command {
        Command::Remove(args) => run_remove(&args),
        Command::Split(args) => run_split(&args),
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("whiteout v{}", env!("CARGO_PKG_VERSION"));
}

fn run_remove(args: &RemoveArgs) -> Result<()> {
    let merged = merge_remove_config(args)?;
    init_logging(args.verbose);

    let paths = collect_image_paths(&merged.input)?;
    info!("Found {} images", paths.len());

    let count = remove_backgrounds(&paths, &merged.options)?;
    info!("Done! {} images processed", count);

    Ok(())
}

fn run_split(args: &SplitArgs) -> Result<()> {
    let thresholds = merge_split_thresholds(args)?;
    init_logging(args.verbose);

    let result = convert_sheet(&args.input, &args.output, &thresholds);
    match split_outcome(result)? {
        SplitOutcome::Saved => info!("Saved: {}", args.output.display()),
        SplitOutcome::Empty => warn!("Empty image?"),
    }

    Ok(())
}

/// How a split run ended when it did not fail
#[derive(Debug, PartialEq, Eq)]
enum SplitOutcome {
    /// The GIF was written
    Saved,
    /// The sheet had no content; nothing was written
    Empty,
}

/// A sheet without content is a clean stop, not a failure.
fn split_outcome(result: Result<()>) -> Result<SplitOutcome> {
    match result {
        Ok(()) => Ok(SplitOutcome::Saved),
        Err(e) => match e.downcast_ref::<WhiteoutError>() {
            Some(WhiteoutError::EmptyImage) => Ok(SplitOutcome::Empty),
            _ => Err(e),
        },
    }
}

/// Thresholds for `split`: CLI > config file > defaults.
fn merge_split_thresholds(args: &SplitArgs) -> Result<Thresholds> {
    let loaded_config = load_optional_config(args.config.as_deref())?;

    let base = match loaded_config {
        Some(lc) => lc.config.thresholds,
        None => Thresholds::default(),
    };

    Ok(Thresholds {
        content: args.content_threshold.unwrap_or(base.content),
        frame_matte: args.matte_threshold.unwrap_or(base.frame_matte),
        ..base
    })
}

/// Merged `remove` settings from CLI args and optional config file.
struct MergedRemove {
    input: Vec<PathBuf>,
    options: RemoveOptions,
}

fn load_optional_config(path: Option<&Path>) -> Result<Option<LoadedConfig>> {
    path.map(|config_path| {
        LoadedConfig::load(config_path)
            .with_context(|| format!("failed to load config: {}", config_path.display()))
    })
    .transpose()
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_remove_config(args: &RemoveArgs) -> Result<MergedRemove> {
    let loaded_config = load_optional_config(args.config.as_deref())?;

    // Inputs: CLI > config
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.resolve_inputs()
    } else {
        // clap's required_unless_present keeps us from getting here
        Vec::new()
    };

    // Output directory: CLI > config > overwrite in place
    let output_dir = match (&args.output, &loaded_config) {
        (Some(dir), _) => Some(dir.clone()),
        (None, Some(lc)) => lc.resolve_output_dir(),
        (None, None) => None,
    };

    let threshold = args.threshold.unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.config.thresholds.remove_background)
            .unwrap_or_else(|| Thresholds::default().remove_background)
    });

    let compress = if args.compress.is_some() {
        args.compress
    } else if let Some(ref lc) = loaded_config {
        lc.config
            .compress
            .as_ref()
            .map(parse_compress_config)
            .transpose()?
    } else {
        None
    };

    Ok(MergedRemove {
        input,
        options: RemoveOptions {
            threshold,
            output_dir,
            compress,
        },
    })
}

fn parse_compress_config(config: &CompressConfig) -> Result<CompressionLevel> {
    match config {
        CompressConfig::Level(n) if *n <= 6 => Ok(CompressionLevel::Level(*n)),
        CompressConfig::Max(s) if s.eq_ignore_ascii_case("max") => Ok(CompressionLevel::Max),
        CompressConfig::Level(n) => Err(anyhow::anyhow!(
            "compress level {} in config file is out of range. Valid values: 0-6, \"max\"",
            n
        )),
        CompressConfig::Max(s) => Err(anyhow::anyhow!(
            "unknown compress value '{}' in config file. Valid values: 0-6, \"max\"",
            s
        )),
    }
}
