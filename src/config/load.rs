use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::{CONFIG_VERSION, WhiteoutConfig};

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: WhiteoutConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: WhiteoutConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {} (expected {})",
                config.version,
                path.display(),
                CONFIG_VERSION
            );
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Input entries resolved against the config directory.
    ///
    /// Glob patterns are left unexpanded; `input::collect_image_paths`
    /// expands them the same way it does for command-line patterns.
    pub fn resolve_inputs(&self) -> Vec<PathBuf> {
        self.config
            .input
            .iter()
            .map(|entry| self.config_dir.join(entry))
            .collect()
    }

    /// Resolve the output directory relative to the config file directory.
    pub fn resolve_output_dir(&self) -> Option<PathBuf> {
        self.config
            .output_dir
            .as_ref()
            .map(|dir| self.config_dir.join(dir))
    }
}
