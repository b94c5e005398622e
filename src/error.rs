use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhiteoutError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Failed to encode GIF '{path}': {message}")]
    GifEncode { path: PathBuf, message: String },

    #[error("No valid images found in input")]
    NoImages,

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Image has no content outside the near-white background")]
    EmptyImage,

    #[error("Frame {index} collapses to {width}x{height} after margin trimming")]
    FrameTooSmall { index: u32, width: i64, height: i64 },

    #[error("{failed} of {total} images failed to process")]
    BatchFailed { failed: usize, total: usize },
}
