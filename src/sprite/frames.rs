use image::{RgbaImage, imageops};

use crate::error::WhiteoutError;
use crate::geometry::Rect;
use crate::matte::{TRANSPARENT_WHITE, is_near_white};

/// Number of frames laid out side by side in a sprite strip
pub const FRAME_COUNT: u32 = 4;

/// Inward crop on every side of a frame, as a percentage of the frame width
/// (left/right) and the strip height (top/bottom). Strips off the border
/// drawn around each frame in the source art.
pub const MARGIN_PERCENT: u32 = 8;

/// Crop windows for each frame of a strip, in strip coordinates.
///
/// The strip is cut into [`FRAME_COUNT`] segments of `width / FRAME_COUNT`
/// pixels; leftover columns on the right are dropped. Each segment then
/// loses [`MARGIN_PERCENT`] on every side, rounded down.
pub fn frame_windows(strip_width: u32, strip_height: u32) -> Result<Vec<Rect>, WhiteoutError> {
    let frame_width = strip_width / FRAME_COUNT;
    let margin_x = percent_of(frame_width, MARGIN_PERCENT);
    let margin_y = percent_of(strip_height, MARGIN_PERCENT);

    (0..FRAME_COUNT)
        .map(|index| {
            let x = index * frame_width + margin_x;
            let width = i64::from(frame_width) - 2 * i64::from(margin_x);
            let height = i64::from(strip_height) - 2 * i64::from(margin_y);

            match (u32::try_from(width), u32::try_from(height)) {
                (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Rect::new(x, margin_y, w, h)),
                _ => Err(WhiteoutError::FrameTooSmall {
                    index,
                    width,
                    height,
                }),
            }
        })
        .collect()
}

/// Cut the frames out of a strip and matte each one.
///
/// Either every frame is produced or an error is returned.
pub fn split_strip(
    strip: &RgbaImage,
    matte_threshold: u8,
) -> Result<Vec<RgbaImage>, WhiteoutError> {
    let windows = frame_windows(strip.width(), strip.height())?;

    Ok(windows
        .iter()
        .map(|window| {
            let mut frame =
                imageops::crop_imm(strip, window.x, window.y, window.width, window.height)
                    .to_image();
            matte_frame(&mut frame, matte_threshold);
            frame
        })
        .collect())
}

/// Make every near-white pixel of a frame transparent, connected or not
pub fn matte_frame(frame: &mut RgbaImage, threshold: u8) -> usize {
    let mut cleared = 0;
    for pixel in frame.pixels_mut() {
        if is_near_white(pixel, threshold) {
            *pixel = TRANSPARENT_WHITE;
            cleared += 1;
        }
    }
    cleared
}

fn percent_of(value: u32, percent: u32) -> u32 {
    // value * percent / 100 never exceeds value for percent <= 100
    u32::try_from(u64::from(value) * u64::from(percent) / 100).unwrap_or(value)
}
