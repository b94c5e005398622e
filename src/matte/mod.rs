mod classify;
mod flood;

pub use classify::{TRANSPARENT_WHITE, is_background, is_near_white};
pub use flood::{FillStats, remove_border_background};
