use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::{ImageFormat, RgbaImage};

use crate::cli::CompressionLevel;
use crate::error::WhiteoutError;

/// Write an RGBA image to `path` as PNG.
///
/// The image is fully encoded (and recompressed, if asked) in memory before
/// the file is touched, so a failed encode never truncates the original when
/// the remover overwrites its input in place.
pub fn save_png(image: &RgbaImage, path: &Path, compress: Option<CompressionLevel>) -> Result<()> {
    let data = encode_png(image, compress).map_err(|failure| failure.at(path))?;

    fs::write(path, data).map_err(|e| WhiteoutError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Why an in-memory encode failed, before a destination path is attached
#[derive(Debug)]
enum EncodeFailure {
    Png(image::ImageError),
    Optimize(oxipng::PngError),
}

impl EncodeFailure {
    fn at(self, path: &Path) -> WhiteoutError {
        let path = path.to_path_buf();
        match self {
            EncodeFailure::Png(source) => WhiteoutError::ImageSave { path, source },
            EncodeFailure::Optimize(e) => WhiteoutError::PngCompress {
                path,
                message: e.to_string(),
            },
        }
    }
}

fn encode_png(
    image: &RgbaImage,
    compress: Option<CompressionLevel>,
) -> Result<Vec<u8>, EncodeFailure> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(EncodeFailure::Png)?;
    let plain = buffer.into_inner();

    let Some(level) = compress else {
        return Ok(plain);
    };
    let options = optimizer_options(level);
    oxipng::optimize_from_memory(&plain, &options).map_err(EncodeFailure::Optimize)
}

fn optimizer_options(level: CompressionLevel) -> oxipng::Options {
    match level {
        CompressionLevel::Level(preset) => oxipng::Options::from_preset(preset),
        CompressionLevel::Max => oxipng::Options::max_compression(),
    }
}
