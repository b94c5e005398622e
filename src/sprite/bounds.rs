use image::RgbaImage;

use crate::geometry::Rect;
use crate::matte::is_near_white;

/// Inclusive min/max coordinates of the non-background pixels in an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl ContentBounds {
    /// Exact rectangle covering every content pixel
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x + 1,
            self.max_y - self.min_y + 1,
        )
    }

    /// Crop window for the sprite strip.
    ///
    /// The max edge is exclusive, so the last content column and row fall
    /// outside the strip. Existing sprite exports depend on this framing.
    pub fn strip_rect(&self) -> Rect {
        Rect::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
        )
    }
}

/// Find the bounding box of every pixel that is not near-white.
///
/// Alpha is ignored: a transparent pixel with a dark colour still counts as
/// content. Returns `None` when the whole image is background.
pub fn find_content_bounds(image: &RgbaImage, threshold: u8) -> Option<ContentBounds> {
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if !is_near_white(pixel, threshold) {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            found = true;
        }
    }

    if !found {
        return None;
    }

    Some(ContentBounds {
        min_x,
        min_y,
        max_x,
        max_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn white(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_single_block_bounds() {
        let mut img = white(400, 200);
        for y in 75..125 {
            for x in 150..250 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }

        let bounds = find_content_bounds(&img, 240).unwrap();

        assert_eq!(bounds.rect(), Rect::new(150, 75, 100, 50));
        assert_eq!(bounds.strip_rect(), Rect::new(150, 75, 99, 49));
    }

    #[test]
    fn test_all_white_has_no_bounds() {
        assert_eq!(find_content_bounds(&white(16, 9), 240), None);
    }

    #[test]
    fn test_near_white_below_threshold_counts_as_content() {
        let mut img = white(10, 10);
        // 240 is not above the cut-off, so it is content
        img.put_pixel(2, 7, Rgba([240, 255, 255, 255]));
        // 241 everywhere is background
        img.put_pixel(5, 5, Rgba([241, 241, 241, 255]));

        let bounds = find_content_bounds(&img, 240).unwrap();

        assert_eq!(bounds.rect(), Rect::new(2, 7, 1, 1));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let mut img = white(8, 8);
        img.put_pixel(1, 2, Rgba([0, 0, 0, 0]));
        img.put_pixel(6, 5, Rgba([0, 0, 0, 0]));

        let bounds = find_content_bounds(&img, 240).unwrap();

        assert_eq!(
            bounds,
            ContentBounds {
                min_x: 1,
                min_y: 2,
                max_x: 6,
                max_y: 5
            }
        );
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(find_content_bounds(&RgbaImage::new(0, 0), 240), None);
    }
}
