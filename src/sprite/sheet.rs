use std::path::Path;

use anyhow::Result;
use image::{RgbaImage, imageops};
use log::debug;

use super::{find_content_bounds, split_strip};
use crate::config::Thresholds;
use crate::error::WhiteoutError;
use crate::input::load_rgba;
use crate::output::write_animation;

/// Extract the matted frames of a sprite sheet held in memory.
///
/// Fails with [`WhiteoutError::EmptyImage`] when the sheet has no content.
pub fn extract_frames(
    sheet: &RgbaImage,
    thresholds: &Thresholds,
) -> Result<Vec<RgbaImage>, WhiteoutError> {
    let Some(bounds) = find_content_bounds(sheet, thresholds.content) else {
        return Err(WhiteoutError::EmptyImage);
    };
    let strip_rect = bounds.strip_rect();
    debug!(
        "Content strip at ({}, {}) size {}x{}",
        strip_rect.x, strip_rect.y, strip_rect.width, strip_rect.height
    );

    let strip = imageops::crop_imm(
        sheet,
        strip_rect.x,
        strip_rect.y,
        strip_rect.width,
        strip_rect.height,
    )
    .to_image();

    split_strip(&strip, thresholds.frame_matte)
}

/// Turn a sprite sheet file into a looping GIF.
///
/// Nothing is written to `output` unless all frames were extracted and encoded.
pub fn convert_sheet(input: &Path, output: &Path, thresholds: &Thresholds) -> Result<()> {
    let sheet = load_rgba(input)?;
    debug!(
        "Loaded {} ({}x{})",
        input.display(),
        sheet.width(),
        sheet.height()
    );

    let frames = extract_frames(&sheet, thresholds)?;
    write_animation(&frames, output)?;

    Ok(())
}
