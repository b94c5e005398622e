mod args;

pub use args::{CliArgs, Command, CompressionLevel, RemoveArgs, SplitArgs};
