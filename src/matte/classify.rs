use image::Rgba;

/// Replacement colour for matted pixels.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// True when red, green and blue are all strictly above `threshold`.
///
/// Alpha is not considered.
pub fn is_near_white(pixel: &Rgba<u8>, threshold: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    r > threshold && g > threshold && b > threshold
}

/// Background test for the border flood fill: visible near-white.
///
/// Fully transparent pixels never match, so a pixel the fill has already
/// cleared cannot be classified again.
pub fn is_background(pixel: &Rgba<u8>, threshold: u8) -> bool {
    is_near_white(pixel, threshold) && pixel[3] > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_background(&Rgba([230, 230, 230, 255]), 230));
        assert!(is_background(&Rgba([231, 231, 231, 255]), 230));
    }

    #[test]
    fn test_every_channel_must_pass() {
        // Only red above the cut-off
        assert!(!is_background(&Rgba([231, 230, 230, 255]), 230));
        assert!(!is_background(&Rgba([255, 255, 230, 255]), 230));
        assert!(!is_background(&Rgba([230, 255, 255, 255]), 230));
        assert!(is_background(&Rgba([231, 231, 231, 1]), 230));
    }

    #[test]
    fn test_transparent_is_never_background() {
        assert!(!is_background(&Rgba([255, 255, 255, 0]), 230));
        assert!(is_near_white(&Rgba([255, 255, 255, 0]), 230));
    }

    #[test]
    fn test_near_white_ignores_alpha() {
        assert!(is_near_white(&Rgba([241, 241, 241, 0]), 240));
        assert!(!is_near_white(&Rgba([240, 255, 255, 255]), 240));
    }
}
