mod load;
mod types;

pub use load::LoadedConfig;
pub use types::{CONFIG_VERSION, CompressConfig, Thresholds, WhiteoutConfig};
