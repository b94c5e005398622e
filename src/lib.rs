pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod matte;
pub mod output;
pub mod remover;
pub mod sprite;

pub use cli::{CliArgs, Command, CompressionLevel};
pub use config::{LoadedConfig, Thresholds, WhiteoutConfig};
pub use error::WhiteoutError;
pub use matte::{FillStats, remove_border_background};
pub use remover::{RemoveOptions, remove_backgrounds};
pub use sprite::{convert_sheet, extract_frames};
