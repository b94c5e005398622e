use serde::{Deserialize, Serialize};

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Near-white cut-offs used by the two tools.
///
/// A pixel is near-white for a threshold `t` when each of its red, green and
/// blue channels is strictly greater than `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Background test for the border flood fill. Pixels must also have
    /// non-zero alpha to count as background.
    pub remove_background: u8,
    /// Splitter content detection: anything not near-white for this value
    /// is part of the sprite strip bounding box. Alpha is ignored.
    pub content: u8,
    /// Splitter per-frame matte: near-white pixels inside a cropped frame
    /// become transparent.
    pub frame_matte: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            remove_background: 230,
            content: 240,
            frame_matte: 220,
        }
    }
}

/// Config file format version this build reads and writes
pub const CONFIG_VERSION: u32 = 1;

/// Whiteout configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteoutConfig {
    /// Config file format version, must equal [`CONFIG_VERSION`]
    pub version: u32,
    /// Input file paths, directories or glob patterns for `remove`
    pub input: Vec<String>,
    /// Write processed images here instead of overwriting the sources
    pub output_dir: Option<String>,
    /// Near-white thresholds
    pub thresholds: Thresholds,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for WhiteoutConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            input: Vec::new(),
            output_dir: None,
            thresholds: Thresholds::default(),
            compress: None,
        }
    }
}
