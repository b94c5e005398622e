use std::fs;
use std::path::Path;

use anyhow::Result;
use gif::{DisposalMethod, Encoder, EncodingError, Frame, Repeat};
use image::RgbaImage;

use crate::error::WhiteoutError;

/// Display time of each frame in milliseconds
pub const FRAME_DELAY_MS: u16 = 250;

/// NeuQuant sampling factor passed to the GIF quantizer (1 best, 30 fastest)
const QUANTIZE_SPEED: i32 = 10;

/// Write frames as an infinitely looping GIF.
///
/// Every frame is shown for [`FRAME_DELAY_MS`] and replaces the previous one
/// instead of being composited over it. The whole file is encoded in memory
/// first, so nothing is written unless every frame encodes.
pub fn write_animation(frames: &[RgbaImage], path: &Path) -> Result<()> {
    let data = encode_animation(frames).map_err(|message| WhiteoutError::GifEncode {
        path: path.to_path_buf(),
        message,
    })?;

    fs::write(path, data).map_err(|e| WhiteoutError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn encode_animation(frames: &[RgbaImage]) -> Result<Vec<u8>, String> {
    if frames.is_empty() {
        return Err("no frames to encode".to_string());
    }

    let mut sizes = Vec::with_capacity(frames.len());
    for image in frames {
        sizes.push(gif_dimensions(image.width(), image.height())?);
    }

    write_gif(frames, &sizes).map_err(|e| e.to_string())
}

/// Encode frames whose sizes have already been checked against the GIF range
fn write_gif(frames: &[RgbaImage], sizes: &[(u16, u16)]) -> Result<Vec<u8>, EncodingError> {
    let canvas_width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(1);
    let canvas_height = sizes.iter().map(|&(_, h)| h).max().unwrap_or(1);

    let mut data = Vec::new();
    {
        let mut encoder = Encoder::new(&mut data, canvas_width, canvas_height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        for (image, &(width, height)) in frames.iter().zip(sizes) {
            let mut pixels = image.as_raw().clone();

            let mut frame = Frame::from_rgba_speed(width, height, &mut pixels, QUANTIZE_SPEED);
            frame.delay = FRAME_DELAY_MS / 10;
            frame.dispose = DisposalMethod::Background;

            encoder.write_frame(&frame)?;
        }
        // Dropping the encoder writes the trailer
    }

    Ok(data)
}

fn gif_dimensions(width: u32, height: u32) -> Result<(u16, u16), String> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(format!(
            "frame size {}x{} is outside the GIF range 1..=65535",
            width, height
        )),
    }
}
