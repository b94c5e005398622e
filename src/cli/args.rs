use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "whiteout")]
#[command(
    version,
    about = "Near-white background remover and sprite strip splitter",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Make border-connected near-white pixels transparent
    Remove(RemoveArgs),
    /// Split a 4-frame horizontal sprite strip into a looping GIF
    Split(SplitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    /// PNG files, directories or glob patterns
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a .whiteout config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write processed images to this directory instead of overwriting the inputs
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Channels must all exceed this value to count as background [default: 230]
    #[arg(long, value_name = "0-255")]
    pub threshold: Option<u8>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Sprite strip image
    pub input: PathBuf,

    /// Output GIF path
    pub output: PathBuf,

    /// Load thresholds from a .whiteout config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pixels with every channel above this are outside the strip [default: 240]
    #[arg(long, value_name = "0-255")]
    pub content_threshold: Option<u8>,

    /// Pixels with every channel above this become transparent in each frame [default: 220]
    #[arg(long, value_name = "0-255")]
    pub matte_threshold: Option<u8>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}
