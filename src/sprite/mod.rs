mod bounds;
mod frames;
mod sheet;

pub use bounds::{ContentBounds, find_content_bounds};
pub use frames::{FRAME_COUNT, MARGIN_PERCENT, frame_windows, matte_frame, split_strip};
pub use sheet::{convert_sheet, extract_frames};
