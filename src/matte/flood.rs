use std::collections::VecDeque;

use image::RgbaImage;

use super::{TRANSPARENT_WHITE, is_background};

/// Outcome of one border flood fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Pixels popped from the queue that were in bounds and not yet visited
    pub visited: u64,
    /// Pixels rewritten to transparent white
    pub cleared: u64,
}

/// Make every background pixel connected to the image border transparent.
///
/// Breadth-first fill seeded from all four edges, stepping through the four
/// orthogonal neighbours of each background pixel. Near-white regions that
/// are fully enclosed by other colours are left as they are.
pub fn remove_border_background(image: &mut RgbaImage, threshold: u8) -> FillStats {
    let (width, height) = image.dimensions();
    let mut stats = FillStats::default();

    if width == 0 || height == 0 {
        return stats;
    }

    let (w, h) = (i64::from(width), i64::from(height));
    let mut visited = vec![false; width as usize * height as usize];
    let mut queue: VecDeque<(i64, i64)> = VecDeque::with_capacity(2 * (width + height) as usize);

    for x in 0..w {
        queue.push_back((x, 0));
        queue.push_back((x, h - 1));
    }
    for y in 0..h {
        queue.push_back((0, y));
        queue.push_back((w - 1, y));
    }

    while let Some((x, y)) = queue.pop_front() {
        // Neighbours are queued unchecked; bounds are enforced here
        let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) else {
            continue;
        };
        if px >= width || py >= height {
            continue;
        }

        let index = py as usize * width as usize + px as usize;
        if visited[index] {
            continue;
        }
        visited[index] = true;
        stats.visited += 1;

        if is_background(image.get_pixel(px, py), threshold) {
            image.put_pixel(px, py, TRANSPARENT_WHITE);
            stats.cleared += 1;

            queue.push_back((x + 1, y));
            queue.push_back((x - 1, y));
            queue.push_back((x, y + 1));
            queue.push_back((x, y - 1));
        }
    }

    stats
}
